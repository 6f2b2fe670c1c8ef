//! User signup, lookup and SMS settings.

use axum::extract::State;
use axum::Json;
use database::models::{NewUser, UserUpdate};
use database::validation::{self, MAX_NAME_LENGTH};
use database::User;
use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Register a user. The password is stored as a bcrypt hash.
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewUser>,
) -> Result<Json<User>> {
    validation::validate_required("username", &req.username, MAX_NAME_LENGTH)?;
    validation::validate_required("firstName", &req.first_name, MAX_NAME_LENGTH)?;
    validation::validate_required("lastName", &req.last_name, MAX_NAME_LENGTH)?;
    validation::validate_password(&req.password)?;
    if let Some(phone) = &req.phone {
        validation::validate_phone(phone)?;
    }

    let user = database::user::create_user(state.db.pool(), &req, state.hash_cost).await?;
    info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Json(user))
}

/// Get a user.
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<User>> {
    let user = database::user::get_user(state.db.pool(), user_id).await?;
    Ok(Json(user))
}

/// Body of `PATCH /api/users/:userId/sms-settings`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsSettingsRequest {
    pub sms_enabled: Option<bool>,
    pub phone: Option<String>,
}

/// Update whether and where a user receives SMS.
pub async fn update_sms_settings(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(req): ApiJson<SmsSettingsRequest>,
) -> Result<Json<User>> {
    let phone = req.phone.map(|p| p.trim().to_string());
    if let Some(phone) = &phone {
        validation::validate_phone(phone)?;
    }

    let update = UserUpdate {
        phone,
        sms_enabled: req.sms_enabled,
        ..Default::default()
    };
    let user = database::user::update_user(state.db.pool(), user_id, &update).await?;
    info!(user_id, sms_enabled = user.sms_enabled, "Updated SMS settings");

    Ok(Json(user))
}
