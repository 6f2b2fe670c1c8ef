//! User CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewUser, User, UserUpdate};
use crate::password;

const USER_COLUMNS: &str =
    "id, username, password_hash, first_name, last_name, phone, sms_enabled, created_at";

/// Create a new user, hashing the draft's password with `hash_cost`.
pub async fn create_user(pool: &SqlitePool, user: &NewUser, hash_cost: u32) -> Result<User> {
    let password_hash = password::hash_password(&user.password, hash_cost)?;

    let query = format!(
        r#"
        INSERT INTO users (username, password_hash, first_name, last_name, phone, sms_enabled)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    );

    let created = sqlx::query_as::<_, User>(&query)
        .bind(&user.username)
        .bind(&password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(user.sms_enabled.unwrap_or(true))
        .fetch_one(pool)
        .await
        .map_err(|e| {
            DatabaseError::from_write(e, "User", &user.username, ("User", user.username.clone()))
        })?;

    tracing::debug!(user_id = created.id, username = %created.username, "Created user");
    Ok(created)
}

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<User> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");

    sqlx::query_as::<_, User>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        })
}

/// Get a user by username.
pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> Result<User> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");

    sqlx::query_as::<_, User>(&query)
        .bind(username)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "User",
            id: username.to_string(),
        })
}

/// Merge the provided fields into an existing user.
pub async fn update_user(pool: &SqlitePool, id: i64, update: &UserUpdate) -> Result<User> {
    let query = format!(
        r#"
        UPDATE users
        SET first_name = COALESCE(?, first_name),
            last_name = COALESCE(?, last_name),
            phone = COALESCE(?, phone),
            sms_enabled = COALESCE(?, sms_enabled)
        WHERE id = ?
        RETURNING {USER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, User>(&query)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone)
        .bind(update.sms_enabled)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        })
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
