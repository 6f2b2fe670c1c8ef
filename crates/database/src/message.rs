//! Message operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Message, NewMessage};

const MESSAGE_COLUMNS: &str = "id, conversation_id, content, is_from_user, timestamp, ai_suggested";

/// Append a message and touch its conversation.
///
/// The parent's `last_message` and `last_active` are set to the new
/// message's content and timestamp in the same transaction.
pub async fn create_message(pool: &SqlitePool, message: &NewMessage) -> Result<Message> {
    let mut tx = pool.begin().await?;

    let query = format!(
        r#"
        INSERT INTO messages (conversation_id, content, is_from_user, ai_suggested)
        VALUES (?, ?, ?, ?)
        RETURNING {MESSAGE_COLUMNS}
        "#
    );

    let created = sqlx::query_as::<_, Message>(&query)
        .bind(message.conversation_id)
        .bind(&message.content)
        .bind(message.is_from_user)
        .bind(message.ai_suggested)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            DatabaseError::from_write(
                e,
                "Message",
                message.conversation_id.to_string(),
                ("Conversation", message.conversation_id.to_string()),
            )
        })?;

    sqlx::query(
        r#"
        UPDATE conversations
        SET last_message = ?, last_active = ?
        WHERE id = ?
        "#,
    )
    .bind(&created.content)
    .bind(&created.timestamp)
    .bind(created.conversation_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(
        message_id = created.id,
        conversation_id = created.conversation_id,
        from_user = created.is_from_user,
        "Created message"
    );
    Ok(created)
}

/// List all messages of a conversation in chronological order.
pub async fn list_messages(pool: &SqlitePool, conversation_id: i64) -> Result<Vec<Message>> {
    let query = format!(
        r#"
        SELECT {MESSAGE_COLUMNS}
        FROM messages
        WHERE conversation_id = ?
        ORDER BY timestamp ASC, id ASC
        "#
    );

    let messages = sqlx::query_as::<_, Message>(&query)
        .bind(conversation_id)
        .fetch_all(pool)
        .await?;

    Ok(messages)
}

/// The last `limit` messages of a conversation, in chronological order.
pub async fn recent_messages(
    pool: &SqlitePool,
    conversation_id: i64,
    limit: i64,
) -> Result<Vec<Message>> {
    let query = format!(
        r#"
        SELECT {MESSAGE_COLUMNS}
        FROM (
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE conversation_id = ?
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
        )
        ORDER BY timestamp ASC, id ASC
        "#
    );

    let messages = sqlx::query_as::<_, Message>(&query)
        .bind(conversation_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation;
    use crate::test_support::{test_conversation, test_db, test_user};

    fn draft(conversation_id: i64, content: &str, is_from_user: bool) -> NewMessage {
        NewMessage {
            conversation_id,
            content: content.to_string(),
            is_from_user,
            ai_suggested: false,
        }
    }

    #[tokio::test]
    async fn test_create_touches_conversation() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;
        let lead = test_conversation(&db, user.id, "Dana").await;

        let message = create_message(db.pool(), &draft(lead.id, "Coffee on Friday?", true))
            .await
            .unwrap();
        assert!(!message.ai_suggested);

        let touched = conversation::get_conversation(db.pool(), lead.id).await.unwrap();
        assert_eq!(touched.last_message.as_deref(), Some("Coffee on Friday?"));
        assert_eq!(touched.last_active, message.timestamp);
        assert!(touched.last_active >= lead.last_active);
    }

    #[tokio::test]
    async fn test_create_for_unknown_conversation_is_not_found() {
        let db = test_db().await;

        let result = create_message(db.pool(), &draft(77, "hello", true)).await;
        assert!(matches!(
            result,
            Err(DatabaseError::NotFound { entity: "Conversation", .. })
        ));
    }

    #[tokio::test]
    async fn test_list_and_recent_are_chronological() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;
        let lead = test_conversation(&db, user.id, "Dana").await;

        for i in 0..5 {
            create_message(db.pool(), &draft(lead.id, &format!("m{}", i), i % 2 == 0))
                .await
                .unwrap();
        }

        let all = list_messages(db.pool(), lead.id).await.unwrap();
        let contents: Vec<&str> = all.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m0", "m1", "m2", "m3", "m4"]);

        let recent = recent_messages(db.pool(), lead.id, 3).await.unwrap();
        let contents: Vec<&str> = recent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m2", "m3", "m4"]);
    }
}
