//! Dashboard counters.

use axum::extract::State;
use axum::Json;
use database::models::StatsUpdate;
use database::{Database, Stats};
use tracing::warn;

use crate::error::Result;
use crate::extract::ApiPath;
use crate::state::AppState;

/// Get a user's stats, creating a zeroed row on first access.
pub async fn get_stats(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<Stats>> {
    let pool = state.db.pool();

    let stats = match database::stats::get_stats(pool, user_id).await? {
        Some(stats) => stats,
        None => database::stats::upsert_stats(pool, user_id, &StatsUpdate::default()).await?,
    };

    Ok(Json(stats))
}

/// Which counter a write bumps.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Counter {
    ActiveConversations,
    CoachingTipsSent,
}

/// Add one to a counter after a primary write.
///
/// Failures are logged and swallowed; the primary write stands.
pub(crate) async fn increment(db: &Database, user_id: i64, counter: Counter) {
    if let Err(err) = try_increment(db, user_id, counter).await {
        warn!(user_id, ?counter, error = %err, "Failed to update stats");
    }
}

async fn try_increment(db: &Database, user_id: i64, counter: Counter) -> database::Result<()> {
    let pool = db.pool();
    let current = database::stats::get_stats(pool, user_id).await?;

    let update = match counter {
        Counter::ActiveConversations => StatsUpdate {
            active_conversations: Some(current.map_or(0, |s| s.active_conversations) + 1),
            ..Default::default()
        },
        Counter::CoachingTipsSent => StatsUpdate {
            coaching_tips_sent: Some(current.map_or(0, |s| s.coaching_tips_sent) + 1),
            ..Default::default()
        },
    };

    database::stats::upsert_stats(pool, user_id, &update).await?;
    Ok(())
}
