//! AI coaching routes: Langflow analysis, Aura chat and coach call requests.
//!
//! The Langflow helpers never fail, so these endpoints only error on store
//! lookups and bad input.

use axum::extract::State;
use axum::Json;
use coach_brain::{ConversationAnalysis, ProfileAnalysis};
use database::models::{ConversationUpdate, NewWorkflow};
use database::validation::{self, MAX_CONTENT_LENGTH};
use database::WorkflowStatus;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::coaching;
use crate::error::Result;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Name of the workflow queued for a human coach call.
pub const COACH_CALL_WORKFLOW: &str = "Coach Call Request";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeConversationRequest {
    pub conversation_id: i64,
}

/// Analyze a lead's messages and store the next step and temperature on it.
pub async fn analyze_conversation(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AnalyzeConversationRequest>,
) -> Result<Json<ConversationAnalysis>> {
    let pool = state.db.pool();

    let conversation = database::conversation::get_conversation(pool, req.conversation_id).await?;
    let texts: Vec<String> = database::message::list_messages(pool, conversation.id)
        .await?
        .into_iter()
        .map(|m| m.content)
        .collect();

    let analysis = state.langflow.analyze_conversation(&texts).await;

    let update = ConversationUpdate {
        ai_suggested_next_step: analysis.next_steps.first().cloned(),
        emotional_temperature: Some(coaching::temperature_for(&analysis)),
        ..Default::default()
    };
    database::conversation::update_conversation(pool, conversation.id, &update).await?;
    info!(
        conversation_id = conversation.id,
        messages = texts.len(),
        engagement = ?analysis.engagement_level,
        "Conversation analyzed"
    );

    Ok(Json(analysis))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeProfileRequest {
    #[serde(default)]
    pub profile: Value,
}

/// Review a dating profile.
pub async fn analyze_profile(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AnalyzeProfileRequest>,
) -> Result<Json<ProfileAnalysis>> {
    Ok(Json(state.langflow.analyze_profile(&req.profile).await))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterRequest {
    #[serde(default)]
    pub profile_info: Value,
}

#[derive(Debug, Serialize)]
pub struct StarterResponse {
    pub starter: String,
}

/// Suggest an opening line for a profile.
pub async fn conversation_starter(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<StarterRequest>,
) -> Result<Json<StarterResponse>> {
    let profile = match req.profile_info {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    };

    let starter = state.langflow.generate_conversation_starter(&profile).await;
    Ok(Json(StarterResponse { starter }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    #[serde(default)]
    pub conversation_context: String,
    pub partner_message: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

/// Suggest a reply to the partner's latest message.
pub async fn response_suggestion(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>> {
    let suggestion = state
        .langflow
        .generate_response_suggestion(&req.conversation_context, &req.partner_message)
        .await;
    Ok(Json(SuggestionResponse { suggestion }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuraChatRequest {
    pub user_id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AuraChatResponse {
    pub response: String,
}

/// Answer a question to Aura about the user's leads.
pub async fn aura_chat(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AuraChatRequest>,
) -> Result<Json<AuraChatResponse>> {
    validation::validate_required("message", &req.message, MAX_CONTENT_LENGTH)?;

    let leads = database::conversation::list_conversations(state.db.pool(), req.user_id).await?;
    let response = coaching::aura_reply(&req.message, &leads);

    Ok(Json(AuraChatResponse { response }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachCallRequest {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachCallResponse {
    pub success: bool,
    pub message: &'static str,
    pub workflow_id: i64,
}

/// Queue a call with a human coach.
pub async fn coach_call_request(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CoachCallRequest>,
) -> Result<Json<CoachCallResponse>> {
    let pool = state.db.pool();
    let user = database::user::get_user(pool, req.user_id).await?;

    let workflow = database::workflow::create_workflow(
        pool,
        &NewWorkflow {
            user_id: user.id,
            name: COACH_CALL_WORKFLOW.to_string(),
            status: Some(WorkflowStatus::Queued),
            results: Some(json!({
                "username": user.username,
                "phone": user.phone,
            })),
        },
    )
    .await?;
    info!(user_id = user.id, workflow_id = workflow.id, "Coach call requested");

    Ok(Json(CoachCallResponse {
        success: true,
        message: "Call request submitted successfully",
        workflow_id: workflow.id,
    }))
}
