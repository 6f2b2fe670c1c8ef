//! Outbound SMS routes and the SMS audit log.
//!
//! Each send writes a `pending` log entry first, then records the provider
//! outcome on it. Provider error text is passed back to the caller.

use axum::extract::State;
use axum::Json;
use database::models::NewSmsLog;
use database::validation::{self, MAX_CONTENT_LENGTH, MAX_NAME_LENGTH};
use database::{SmsLog, SmsType, User};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use twilio_client::SendOutcome;

use crate::error::{ApiError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Partner message sent to the suggestion flow when asking for a rescue line.
const EMERGENCY_PROMPT: &str = "EMERGENCY_HELP";

/// Result of an SMS endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTipRequest {
    pub user_id: i64,
    pub tip: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    pub user_id: i64,
    pub partner_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyHelpRequest {
    pub user_id: i64,
    #[serde(default)]
    pub conversation_context: String,
}

/// List a user's SMS log, newest first.
pub async fn list_logs(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<Vec<SmsLog>>> {
    let logs = database::sms_log::list_sms_logs(state.db.pool(), user_id).await?;
    Ok(Json(logs))
}

/// Text the user a daily tip.
pub async fn daily_tip(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DailyTipRequest>,
) -> Result<Json<SmsResponse>> {
    validation::validate_required("tip", &req.tip, MAX_CONTENT_LENGTH)?;
    let (user, phone) = sms_recipient(&state, req.user_id).await?;

    let log = open_log(&state, &user, SmsType::DailyTip, &req.tip, &phone).await?;
    let outcome = state.twilio.send_daily_tip(&phone, &req.tip).await;
    close_log(&state, &log, &outcome).await?;

    Ok(Json(SmsResponse::from_outcome(outcome, None)))
}

/// Remind the user to answer a partner.
pub async fn reminder(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ReminderRequest>,
) -> Result<Json<SmsResponse>> {
    validation::validate_required("partnerName", &req.partner_name, MAX_NAME_LENGTH)?;
    let (user, phone) = sms_recipient(&state, req.user_id).await?;

    let content = format!("Reminder to respond to {}", req.partner_name);
    let log = open_log(&state, &user, SmsType::Reminder, &content, &phone).await?;
    let outcome = state
        .twilio
        .send_response_reminder(&phone, &req.partner_name)
        .await;
    close_log(&state, &log, &outcome).await?;

    Ok(Json(SmsResponse::from_outcome(outcome, None)))
}

/// Generate a rescue line for a stalling conversation and text it.
pub async fn emergency_help(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<EmergencyHelpRequest>,
) -> Result<Json<SmsResponse>> {
    let (user, phone) = sms_recipient(&state, req.user_id).await?;

    let suggestion = state
        .langflow
        .generate_response_suggestion(&req.conversation_context, EMERGENCY_PROMPT)
        .await;

    let log = open_log(&state, &user, SmsType::EmergencyHelp, &suggestion, &phone).await?;
    let outcome = state.twilio.send_emergency_help(&phone, &suggestion).await;
    close_log(&state, &log, &outcome).await?;

    Ok(Json(SmsResponse::from_outcome(outcome, Some(suggestion))))
}

impl SmsResponse {
    fn from_outcome(outcome: SendOutcome, suggestion: Option<String>) -> Self {
        Self {
            success: outcome.success,
            suggestion,
            error: outcome.error,
        }
    }
}

/// Load the user and their phone, rejecting users who can't receive SMS.
async fn sms_recipient(state: &AppState, user_id: i64) -> Result<(User, String)> {
    let user = database::user::get_user(state.db.pool(), user_id).await?;

    let phone = match (&user.phone, user.sms_enabled) {
        (Some(phone), true) if !phone.trim().is_empty() => phone.trim().to_string(),
        _ => {
            return Err(ApiError::BadRequest(
                "User has no phone number or SMS is disabled".to_string(),
            ))
        }
    };

    Ok((user, phone))
}

async fn open_log(
    state: &AppState,
    user: &User,
    message_type: SmsType,
    content: &str,
    phone: &str,
) -> Result<SmsLog> {
    let draft = NewSmsLog::pending(user.id, message_type, content, phone);
    Ok(database::sms_log::create_sms_log(state.db.pool(), &draft).await?)
}

async fn close_log(state: &AppState, log: &SmsLog, outcome: &SendOutcome) -> Result<()> {
    let pool = state.db.pool();

    if outcome.success {
        database::sms_log::mark_sent(pool, log.id, outcome.sid.clone()).await?;
        info!(user_id = log.user_id, log_id = log.id, sms_type = ?log.message_type, "SMS sent");
    } else {
        database::sms_log::mark_failed(pool, log.id).await?;
        warn!(
            user_id = log.user_id,
            log_id = log.id,
            error = outcome.error.as_deref().unwrap_or_default(),
            "SMS failed"
        );
    }

    Ok(())
}
