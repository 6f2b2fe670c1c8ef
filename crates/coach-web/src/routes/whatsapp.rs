//! WhatsApp API routes.

use axum::extract::State;
use axum::Json;
use database::validation::{self, MAX_CONTENT_LENGTH};
use database::{Conversation, DatabaseError, Message, User};
use serde::{Deserialize, Serialize};
use tracing::info;
use twilio_client::{strip_whatsapp_prefix, SendOutcome};

use crate::error::{ApiError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Partner name given to a user's WhatsApp thread with Aura.
pub const AURA_THREAD: &str = "LoveCoach AI";

/// Channel marker of the WhatsApp thread; one per user.
pub const WHATSAPP_CHANNEL: &str = "whatsapp";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub message: String,
}

/// Send a WhatsApp message to any number.
pub async fn send(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SendRequest>,
) -> Result<Json<SendOutcome>> {
    let phone = strip_whatsapp_prefix(req.phone_number.trim());
    if phone.is_empty() || req.message.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Phone number and message are required".to_string(),
        ));
    }
    validation::validate_required("message", &req.message, MAX_CONTENT_LENGTH)?;

    let outcome = state.twilio.send_whatsapp(phone, &req.message).await;
    info!(to = phone, success = outcome.success, "WhatsApp message sent from API");

    Ok(Json(outcome))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub configured: bool,
    pub phone_number: Option<String>,
}

/// Whether WhatsApp replies go out for real, and from which number.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        configured: state.twilio.is_configured() && state.mistral.is_configured(),
        phone_number: state.twilio.from_number().map(str::to_string),
    })
}

/// A WhatsApp user's thread with Aura.
#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub user: User,
    pub conversation: Option<Conversation>,
    pub messages: Vec<Message>,
}

/// Look up the Aura thread of the user registered under a phone number.
pub async fn conversation(
    State(state): State<AppState>,
    ApiPath(phone_number): ApiPath<String>,
) -> Result<Json<ThreadResponse>> {
    let pool = state.db.pool();
    let phone = strip_whatsapp_prefix(phone_number.trim());

    let user = database::user::get_user_by_username(pool, phone)
        .await
        .map_err(|err| match err {
            DatabaseError::NotFound { .. } => ApiError::NotFound("WhatsApp user".to_string()),
            other => other.into(),
        })?;

    let conversation = database::conversation::find_by_channel(pool, user.id, WHATSAPP_CHANNEL).await?;
    let messages = match &conversation {
        Some(thread) => database::message::list_messages(pool, thread.id).await?,
        None => Vec::new(),
    };

    Ok(Json(ThreadResponse {
        user,
        conversation,
        messages,
    }))
}
