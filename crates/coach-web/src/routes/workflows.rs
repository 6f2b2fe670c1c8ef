//! AI workflow routes.

use axum::extract::State;
use axum::Json;
use database::models::{NewWorkflow, WorkflowUpdate};
use database::validation::{self, MAX_NAME_LENGTH};
use database::Workflow;
use tracing::info;

use crate::error::Result;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// List a user's workflows, most recently updated first.
pub async fn list_workflows(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<Vec<Workflow>>> {
    let workflows = database::workflow::list_workflows(state.db.pool(), user_id).await?;
    Ok(Json(workflows))
}

/// Record a new workflow run.
pub async fn create_workflow(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewWorkflow>,
) -> Result<Json<Workflow>> {
    validation::validate_required("name", &req.name, MAX_NAME_LENGTH)?;

    let workflow = database::workflow::create_workflow(state.db.pool(), &req).await?;
    info!(
        workflow_id = workflow.id,
        user_id = workflow.user_id,
        name = %workflow.name,
        "Workflow created"
    );

    Ok(Json(workflow))
}

/// Update a workflow's status or results.
pub async fn update_workflow(
    State(state): State<AppState>,
    ApiPath(workflow_id): ApiPath<i64>,
    ApiJson(req): ApiJson<WorkflowUpdate>,
) -> Result<Json<Workflow>> {
    if let Some(name) = &req.name {
        validation::validate_required("name", name, MAX_NAME_LENGTH)?;
    }

    let workflow = database::workflow::update_workflow(state.db.pool(), workflow_id, &req).await?;
    info!(workflow_id, status = ?workflow.status, "Workflow updated");

    Ok(Json(workflow))
}
