//! SMS and WhatsApp delivery log.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewSmsLog, SmsLog, SmsLogUpdate, SmsStatus};

const SMS_LOG_COLUMNS: &str =
    "id, user_id, message_type, content, phone, status, provider_sid, sent_at, created_at";

/// Record an outbound message.
///
/// `sent_at` is stamped immediately when the entry is created as `Sent`.
pub async fn create_sms_log(pool: &SqlitePool, log: &NewSmsLog) -> Result<SmsLog> {
    let query = format!(
        r#"
        INSERT INTO sms_logs (user_id, message_type, content, phone, status, provider_sid, sent_at)
        VALUES (?, ?, ?, ?, ?, ?,
            CASE WHEN ? = 'sent' THEN strftime('%Y-%m-%dT%H:%M:%fZ', 'now') END)
        RETURNING {SMS_LOG_COLUMNS}
        "#
    );

    let created = sqlx::query_as::<_, SmsLog>(&query)
        .bind(log.user_id)
        .bind(log.message_type)
        .bind(&log.content)
        .bind(&log.phone)
        .bind(log.status)
        .bind(&log.provider_sid)
        .bind(log.status)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            DatabaseError::from_write(e, "SmsLog", &log.phone, ("User", log.user_id.to_string()))
        })?;

    tracing::debug!(
        sms_log_id = created.id,
        user_id = created.user_id,
        status = ?created.status,
        "Created SMS log"
    );
    Ok(created)
}

/// List a user's SMS log, newest first.
pub async fn list_sms_logs(pool: &SqlitePool, user_id: i64) -> Result<Vec<SmsLog>> {
    let query = format!(
        r#"
        SELECT {SMS_LOG_COLUMNS}
        FROM sms_logs
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        "#
    );

    let logs = sqlx::query_as::<_, SmsLog>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(logs)
}

/// Apply a delivery transition.
///
/// Moving to `Sent` stamps `sent_at` once; later updates keep the first stamp.
pub async fn update_sms_log(pool: &SqlitePool, id: i64, update: &SmsLogUpdate) -> Result<SmsLog> {
    let query = format!(
        r#"
        UPDATE sms_logs
        SET status = COALESCE(?1, status),
            provider_sid = COALESCE(?2, provider_sid),
            sent_at = CASE
                WHEN ?1 = 'sent' AND sent_at IS NULL
                    THEN strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                ELSE sent_at
            END
        WHERE id = ?3
        RETURNING {SMS_LOG_COLUMNS}
        "#
    );

    sqlx::query_as::<_, SmsLog>(&query)
        .bind(update.status)
        .bind(&update.provider_sid)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "SmsLog",
            id: id.to_string(),
        })
}

/// Look up a log entry by the provider's message id.
pub async fn get_sms_log_by_provider_id(
    pool: &SqlitePool,
    provider_sid: &str,
) -> Result<Option<SmsLog>> {
    let query = format!(
        r#"
        SELECT {SMS_LOG_COLUMNS}
        FROM sms_logs
        WHERE provider_sid = ?
        ORDER BY id DESC
        LIMIT 1
        "#
    );

    let log = sqlx::query_as::<_, SmsLog>(&query)
        .bind(provider_sid)
        .fetch_optional(pool)
        .await?;

    Ok(log)
}

/// Mark an entry sent with its provider id.
pub async fn mark_sent(pool: &SqlitePool, id: i64, provider_sid: Option<String>) -> Result<SmsLog> {
    update_sms_log(
        pool,
        id,
        &SmsLogUpdate {
            status: Some(SmsStatus::Sent),
            provider_sid,
        },
    )
    .await
}

/// Mark an entry failed.
pub async fn mark_failed(pool: &SqlitePool, id: i64) -> Result<SmsLog> {
    update_sms_log(
        pool,
        id,
        &SmsLogUpdate {
            status: Some(SmsStatus::Failed),
            provider_sid: None,
        },
    )
    .await
}
