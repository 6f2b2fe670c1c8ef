//! Lead (conversation) routes.

use axum::extract::State;
use axum::Json;
use database::models::{ConversationUpdate, NewConversation};
use database::validation::{self, MAX_NAME_LENGTH};
use database::{Conversation, Message};
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::routes::stats::{self, Counter};
use crate::state::AppState;

/// A lead together with its messages.
#[derive(Serialize)]
pub struct ConversationDetail {
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

/// List a user's leads, most recently active first.
pub async fn list_conversations(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<Vec<Conversation>>> {
    let conversations = database::conversation::list_conversations(state.db.pool(), user_id).await?;
    Ok(Json(conversations))
}

/// Get one of a user's leads with its messages.
pub async fn get_conversation(
    State(state): State<AppState>,
    ApiPath((user_id, conversation_id)): ApiPath<(i64, i64)>,
) -> Result<Json<ConversationDetail>> {
    let pool = state.db.pool();

    let conversation = database::conversation::get_conversation(pool, conversation_id).await?;
    if conversation.user_id != user_id {
        return Err(ApiError::NotFound("Conversation".to_string()));
    }

    let messages = database::message::list_messages(pool, conversation_id).await?;
    Ok(Json(ConversationDetail {
        conversation,
        messages,
    }))
}

/// Start tracking a lead.
pub async fn create_conversation(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewConversation>,
) -> Result<Json<Conversation>> {
    validation::validate_required("partnerName", &req.partner_name, MAX_NAME_LENGTH)?;
    if let Some(rate) = req.response_rate {
        validation::validate_percentage("responseRate", rate)?;
    }

    let conversation = database::conversation::create_conversation(state.db.pool(), &req).await?;
    info!(
        conversation_id = conversation.id,
        user_id = conversation.user_id,
        "Lead created"
    );

    stats::increment(&state.db, conversation.user_id, Counter::ActiveConversations).await;

    Ok(Json(conversation))
}

/// Change a lead's stage, status, flags or other fields.
pub async fn update_conversation(
    State(state): State<AppState>,
    ApiPath(conversation_id): ApiPath<i64>,
    ApiJson(req): ApiJson<ConversationUpdate>,
) -> Result<Json<Conversation>> {
    if let Some(name) = &req.partner_name {
        validation::validate_required("partnerName", name, MAX_NAME_LENGTH)?;
    }
    if let Some(rate) = req.response_rate {
        validation::validate_percentage("responseRate", rate)?;
    }

    let conversation =
        database::conversation::update_conversation(state.db.pool(), conversation_id, &req).await?;
    info!(
        conversation_id,
        stage = conversation.relationship_stage.as_str(),
        "Lead updated"
    );

    Ok(Json(conversation))
}
