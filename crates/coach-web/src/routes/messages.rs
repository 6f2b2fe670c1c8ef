//! Message routes.

use axum::extract::State;
use axum::Json;
use database::models::NewMessage;
use database::validation::{self, MAX_CONTENT_LENGTH};
use database::Message;
use tracing::debug;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Append a message; the lead's last message and activity follow it.
pub async fn create_message(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewMessage>,
) -> Result<Json<Message>> {
    validation::validate_required("content", &req.content, MAX_CONTENT_LENGTH)?;

    let message = database::message::create_message(state.db.pool(), &req).await?;
    debug!(
        message_id = message.id,
        conversation_id = message.conversation_id,
        "Message stored"
    );

    Ok(Json(message))
}
