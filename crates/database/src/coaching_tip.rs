//! Coaching tip operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{CoachingTip, NewCoachingTip};

const TIP_COLUMNS: &str = "id, user_id, tip_type, title, content, conversation_id, is_read, created_at";

/// Store a coaching tip.
///
/// A tip may optionally point at one of the user's conversations; an
/// unknown conversation is reported as `NotFound` before anything is written.
pub async fn create_tip(pool: &SqlitePool, tip: &NewCoachingTip) -> Result<CoachingTip> {
    if let Some(conversation_id) = tip.conversation_id {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM conversations WHERE id = ?)",
        )
        .bind(conversation_id)
        .fetch_one(pool)
        .await?;

        if !exists {
            return Err(DatabaseError::NotFound {
                entity: "Conversation",
                id: conversation_id.to_string(),
            });
        }
    }

    let query = format!(
        r#"
        INSERT INTO coaching_tips (user_id, tip_type, title, content, conversation_id, is_read)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {TIP_COLUMNS}
        "#
    );

    let created = sqlx::query_as::<_, CoachingTip>(&query)
        .bind(tip.user_id)
        .bind(tip.tip_type)
        .bind(&tip.title)
        .bind(&tip.content)
        .bind(tip.conversation_id)
        .bind(tip.is_read)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            DatabaseError::from_write(e, "CoachingTip", &tip.title, ("User", tip.user_id.to_string()))
        })?;

    tracing::debug!(tip_id = created.id, user_id = created.user_id, "Created coaching tip");
    Ok(created)
}

/// List a user's tips, newest first.
pub async fn list_tips(pool: &SqlitePool, user_id: i64) -> Result<Vec<CoachingTip>> {
    let query = format!(
        r#"
        SELECT {TIP_COLUMNS}
        FROM coaching_tips
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        "#
    );

    let tips = sqlx::query_as::<_, CoachingTip>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(tips)
}

/// Mark a tip as read. Idempotent.
pub async fn mark_tip_read(pool: &SqlitePool, id: i64) -> Result<CoachingTip> {
    let query = format!(
        r#"
        UPDATE coaching_tips
        SET is_read = 1
        WHERE id = ?
        RETURNING {TIP_COLUMNS}
        "#
    );

    sqlx::query_as::<_, CoachingTip>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "CoachingTip",
            id: id.to_string(),
        })
}
