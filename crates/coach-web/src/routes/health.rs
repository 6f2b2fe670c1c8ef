//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub integrations: Integrations,
}

/// Which providers run for real rather than in mock mode.
#[derive(Serialize)]
pub struct Integrations {
    pub langflow: bool,
    pub mistral: bool,
    pub twilio: bool,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        integrations: Integrations {
            langflow: state.langflow.is_configured(),
            mistral: state.mistral.is_configured(),
            twilio: state.twilio.is_configured(),
        },
    })
}
