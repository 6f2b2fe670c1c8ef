//! Route handlers for the LoveCoach API.

pub mod ai;
pub mod coaching_tips;
pub mod conversations;
pub mod dashboard;
pub mod health;
pub mod messages;
pub mod sms;
pub mod stats;
pub mod users;
pub mod webhooks;
pub mod whatsapp;
pub mod workflows;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
///
/// Sibling routes must share parameter names (`:id`); handlers read path
/// parameters by position.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(dashboard::dashboard_page))
        // Health check
        .route("/health", get(health::health))
        // Users
        .route("/api/users", post(users::create_user))
        .route("/api/users/:user_id", get(users::get_user))
        .route("/api/users/:user_id/sms-settings", patch(users::update_sms_settings))
        .route("/api/stats/:user_id", get(stats::get_stats))
        // Leads and messages
        .route("/api/conversations", post(conversations::create_conversation))
        .route(
            "/api/conversations/:id",
            get(conversations::list_conversations).patch(conversations::update_conversation),
        )
        .route(
            "/api/conversations/:id/:conversation_id",
            get(conversations::get_conversation),
        )
        .route("/api/messages", post(messages::create_message))
        // Coaching
        .route("/api/coaching-tips", post(coaching_tips::create_tip))
        .route("/api/coaching-tips/:id", get(coaching_tips::list_tips))
        .route("/api/coaching-tips/:id/read", patch(coaching_tips::mark_read))
        .route("/api/workflows", post(workflows::create_workflow))
        .route(
            "/api/workflows/:id",
            get(workflows::list_workflows).patch(workflows::update_workflow),
        )
        // SMS
        .route("/api/sms/logs/:user_id", get(sms::list_logs))
        .route("/api/sms/daily-tip", post(sms::daily_tip))
        .route("/api/sms/reminder", post(sms::reminder))
        .route("/api/sms/emergency-help", post(sms::emergency_help))
        // AI
        .route("/api/analyze-conversation", post(ai::analyze_conversation))
        .route("/api/analyze-profile", post(ai::analyze_profile))
        .route("/api/conversation-starter", post(ai::conversation_starter))
        .route("/api/response-suggestion", post(ai::response_suggestion))
        .route("/api/aura-chat", post(ai::aura_chat))
        .route("/api/coach-call-request", post(ai::coach_call_request))
        // WhatsApp
        .route("/api/whatsapp/send", post(whatsapp::send))
        .route("/api/whatsapp/status", get(whatsapp::status))
        .route(
            "/api/whatsapp/conversation/:phone_number",
            get(whatsapp::conversation),
        )
        // Provider webhooks
        .route("/webhook/whatsapp", post(webhooks::whatsapp))
        .route("/webhook/sms-status", post(webhooks::sms_status))
}
