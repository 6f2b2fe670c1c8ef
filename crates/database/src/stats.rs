//! Per-user dashboard statistics.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Stats, StatsUpdate};

const STATS_COLUMNS: &str = "id, user_id, active_conversations, response_rate, \
    coaching_tips_sent, success_score, updated_at";

/// Get a user's stats record, if one exists.
pub async fn get_stats(pool: &SqlitePool, user_id: i64) -> Result<Option<Stats>> {
    let query = format!("SELECT {STATS_COLUMNS} FROM stats WHERE user_id = ?");

    let stats = sqlx::query_as::<_, Stats>(&query)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(stats)
}

/// Create or merge a user's stats.
///
/// A missing record is created with zeros for omitted counters; an existing
/// one keeps the counters the update leaves out. `updated_at` is always
/// refreshed. There is exactly one record per user.
pub async fn upsert_stats(pool: &SqlitePool, user_id: i64, update: &StatsUpdate) -> Result<Stats> {
    let query = format!(
        r#"
        INSERT INTO stats (
            user_id, active_conversations, response_rate, coaching_tips_sent, success_score
        )
        VALUES (?1, COALESCE(?2, 0), COALESCE(?3, 0), COALESCE(?4, 0), COALESCE(?5, 0))
        ON CONFLICT(user_id) DO UPDATE SET
            active_conversations = COALESCE(?2, active_conversations),
            response_rate = COALESCE(?3, response_rate),
            coaching_tips_sent = COALESCE(?4, coaching_tips_sent),
            success_score = COALESCE(?5, success_score),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        RETURNING {STATS_COLUMNS}
        "#
    );

    let stats = sqlx::query_as::<_, Stats>(&query)
        .bind(user_id)
        .bind(update.active_conversations)
        .bind(update.response_rate)
        .bind(update.coaching_tips_sent)
        .bind(update.success_score)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            DatabaseError::from_write(e, "Stats", user_id.to_string(), ("User", user_id.to_string()))
        })?;

    tracing::debug!(user_id, "Upserted stats");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_db, test_user};

    #[tokio::test]
    async fn test_missing_stats_is_none() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;

        assert!(get_stats(db.pool(), user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_creates_then_merges() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;

        let created = upsert_stats(
            db.pool(),
            user.id,
            &StatsUpdate {
                active_conversations: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(created.active_conversations, 3);
        assert_eq!(created.response_rate, 0);

        let merged = upsert_stats(
            db.pool(),
            user.id,
            &StatsUpdate {
                response_rate: Some(70),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(merged.id, created.id);
        assert_eq!(merged.active_conversations, 3);
        assert_eq!(merged.response_rate, 70);
        assert!(merged.updated_at >= created.updated_at);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stats WHERE user_id = ?")
            .bind(user.id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_upsert_for_unknown_user_is_not_found() {
        let db = test_db().await;

        let result = upsert_stats(db.pool(), 404, &StatsUpdate::default()).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { entity: "User", .. })));
    }
}
