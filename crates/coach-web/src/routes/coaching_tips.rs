//! Coaching tip routes.

use axum::extract::State;
use axum::Json;
use database::models::NewCoachingTip;
use database::validation::{self, MAX_CONTENT_LENGTH, MAX_NAME_LENGTH};
use database::CoachingTip;
use tracing::info;

use crate::error::Result;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::stats::{self, Counter};
use crate::state::AppState;

/// List a user's tips, newest first.
pub async fn list_tips(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<Vec<CoachingTip>>> {
    let tips = database::coaching_tip::list_tips(state.db.pool(), user_id).await?;
    Ok(Json(tips))
}

/// Store a tip and count it as sent.
pub async fn create_tip(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewCoachingTip>,
) -> Result<Json<CoachingTip>> {
    validation::validate_required("title", &req.title, MAX_NAME_LENGTH)?;
    validation::validate_required("content", &req.content, MAX_CONTENT_LENGTH)?;

    let tip = database::coaching_tip::create_tip(state.db.pool(), &req).await?;
    info!(tip_id = tip.id, user_id = tip.user_id, tip_type = ?tip.tip_type, "Coaching tip created");

    stats::increment(&state.db, tip.user_id, Counter::CoachingTipsSent).await;

    Ok(Json(tip))
}

/// Mark a tip read.
pub async fn mark_read(
    State(state): State<AppState>,
    ApiPath(tip_id): ApiPath<i64>,
) -> Result<Json<CoachingTip>> {
    let tip = database::coaching_tip::mark_tip_read(state.db.pool(), tip_id).await?;
    Ok(Json(tip))
}
