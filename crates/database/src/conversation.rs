//! Conversation (lead) operations.

use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Conversation, ConversationUpdate, NewConversation};

pub(crate) const CONVERSATION_COLUMNS: &str = "id, user_id, partner_name, partner_image, \
    last_message, last_active, status, relationship_stage, star_sign, mbti_type, \
    emotional_temperature, red_flags, green_flags, ai_suggested_next_step, response_rate, \
    created_at, channel";

/// Create a conversation, filling defaults for omitted fields.
pub async fn create_conversation(
    pool: &SqlitePool,
    conversation: &NewConversation,
) -> Result<Conversation> {
    let query = format!(
        r#"
        INSERT INTO conversations (
            user_id, partner_name, partner_image, last_message, status, relationship_stage,
            star_sign, mbti_type, emotional_temperature, red_flags, green_flags,
            ai_suggested_next_step, response_rate, channel
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {CONVERSATION_COLUMNS}
        "#
    );

    let created = sqlx::query_as::<_, Conversation>(&query)
        .bind(conversation.user_id)
        .bind(&conversation.partner_name)
        .bind(&conversation.partner_image)
        .bind(&conversation.last_message)
        .bind(conversation.status.unwrap_or_default())
        .bind(conversation.relationship_stage.unwrap_or_default())
        .bind(&conversation.star_sign)
        .bind(&conversation.mbti_type)
        .bind(conversation.emotional_temperature.unwrap_or_default())
        .bind(Json(&conversation.red_flags))
        .bind(Json(&conversation.green_flags))
        .bind(&conversation.ai_suggested_next_step)
        .bind(conversation.response_rate.unwrap_or(0))
        .bind(&conversation.channel)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            DatabaseError::from_write(
                e,
                "Conversation",
                &conversation.partner_name,
                ("User", conversation.user_id.to_string()),
            )
        })?;

    tracing::debug!(
        conversation_id = created.id,
        user_id = created.user_id,
        "Created conversation"
    );
    Ok(created)
}

/// Get a conversation by ID.
pub async fn get_conversation(pool: &SqlitePool, id: i64) -> Result<Conversation> {
    let query = format!("SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = ?");

    sqlx::query_as::<_, Conversation>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Conversation",
            id: id.to_string(),
        })
}

/// List a user's conversations, most recently active first.
pub async fn list_conversations(pool: &SqlitePool, user_id: i64) -> Result<Vec<Conversation>> {
    let query = format!(
        r#"
        SELECT {CONVERSATION_COLUMNS}
        FROM conversations
        WHERE user_id = ?
        ORDER BY last_active DESC, id DESC
        "#
    );

    let conversations = sqlx::query_as::<_, Conversation>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(conversations)
}

/// Find a user's conversation with a given partner name.
///
/// Returns the oldest match so a thread keyed by partner name stays stable.
pub async fn find_by_partner(
    pool: &SqlitePool,
    user_id: i64,
    partner_name: &str,
) -> Result<Option<Conversation>> {
    let query = format!(
        r#"
        SELECT {CONVERSATION_COLUMNS}
        FROM conversations
        WHERE user_id = ? AND partner_name = ?
        ORDER BY id ASC
        LIMIT 1
        "#
    );

    let conversation = sqlx::query_as::<_, Conversation>(&query)
        .bind(user_id)
        .bind(partner_name)
        .fetch_optional(pool)
        .await?;

    Ok(conversation)
}

/// Find a user's thread on a messaging channel.
///
/// At most one exists per user and channel; renaming the thread does not
/// affect the lookup.
pub async fn find_by_channel(
    pool: &SqlitePool,
    user_id: i64,
    channel: &str,
) -> Result<Option<Conversation>> {
    let query = format!(
        "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE user_id = ? AND channel = ?"
    );

    let conversation = sqlx::query_as::<_, Conversation>(&query)
        .bind(user_id)
        .bind(channel)
        .fetch_optional(pool)
        .await?;

    Ok(conversation)
}

/// Merge the provided fields into an existing conversation.
pub async fn update_conversation(
    pool: &SqlitePool,
    id: i64,
    update: &ConversationUpdate,
) -> Result<Conversation> {
    let query = format!(
        r#"
        UPDATE conversations
        SET partner_name = COALESCE(?, partner_name),
            partner_image = COALESCE(?, partner_image),
            last_message = COALESCE(?, last_message),
            status = COALESCE(?, status),
            relationship_stage = COALESCE(?, relationship_stage),
            star_sign = COALESCE(?, star_sign),
            mbti_type = COALESCE(?, mbti_type),
            emotional_temperature = COALESCE(?, emotional_temperature),
            red_flags = COALESCE(?, red_flags),
            green_flags = COALESCE(?, green_flags),
            ai_suggested_next_step = COALESCE(?, ai_suggested_next_step),
            response_rate = COALESCE(?, response_rate)
        WHERE id = ?
        RETURNING {CONVERSATION_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Conversation>(&query)
        .bind(&update.partner_name)
        .bind(&update.partner_image)
        .bind(&update.last_message)
        .bind(update.status)
        .bind(update.relationship_stage)
        .bind(&update.star_sign)
        .bind(&update.mbti_type)
        .bind(update.emotional_temperature)
        .bind(update.red_flags.as_ref().map(Json))
        .bind(update.green_flags.as_ref().map(Json))
        .bind(&update.ai_suggested_next_step)
        .bind(update.response_rate)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Conversation",
            id: id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmotionalTemperature, LeadStatus, RelationshipStage};
    use crate::test_support::{test_db, test_user};

    #[tokio::test]
    async fn test_create_fills_defaults() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;

        let conversation = create_conversation(
            db.pool(),
            &NewConversation {
                user_id: user.id,
                partner_name: "Dana".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(conversation.relationship_stage, RelationshipStage::Lust);
        assert_eq!(conversation.status, LeadStatus::ActiveLead);
        assert_eq!(conversation.emotional_temperature, EmotionalTemperature::Neutral);
        assert_eq!(conversation.response_rate, 0);
        assert!(conversation.red_flags.is_empty());
        assert!(conversation.last_message.is_none());
    }

    #[tokio::test]
    async fn test_create_for_unknown_user_is_not_found() {
        let db = test_db().await;

        let result = create_conversation(
            db.pool(),
            &NewConversation {
                user_id: 42,
                partner_name: "Dana".to_string(),
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(result, Err(DatabaseError::NotFound { entity: "User", .. })));
    }

    #[tokio::test]
    async fn test_list_orders_by_last_active() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;
        let other = test_user(&db, "casey").await;

        let first = create_conversation(
            db.pool(),
            &NewConversation {
                user_id: user.id,
                partner_name: "Sam".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let second = create_conversation(
            db.pool(),
            &NewConversation {
                user_id: user.id,
                partner_name: "Robin".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        create_conversation(
            db.pool(),
            &NewConversation {
                user_id: other.id,
                partner_name: "Lee".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        sqlx::query("UPDATE conversations SET last_active = '2000-01-01T00:00:00.000Z' WHERE id = ?")
            .bind(second.id)
            .execute(db.pool())
            .await
            .unwrap();

        let listed = list_conversations(db.pool(), user.id).await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;
        let conversation = create_conversation(
            db.pool(),
            &NewConversation {
                user_id: user.id,
                partner_name: "Dana".to_string(),
                star_sign: Some("Leo".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let updated = update_conversation(
            db.pool(),
            conversation.id,
            &ConversationUpdate {
                relationship_stage: Some(RelationshipStage::Labor),
                green_flags: Some(vec!["asks follow-up questions".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.relationship_stage, RelationshipStage::Labor);
        assert_eq!(updated.green_flags, vec!["asks follow-up questions".to_string()]);
        assert_eq!(updated.star_sign.as_deref(), Some("Leo"));
        assert_eq!(updated.partner_name, "Dana");

        let missing = update_conversation(db.pool(), 999, &ConversationUpdate::default()).await;
        assert!(matches!(missing, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_one_thread_per_channel() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;
        let thread = NewConversation {
            user_id: user.id,
            partner_name: "Coach".to_string(),
            channel: Some("whatsapp".to_string()),
            ..Default::default()
        };

        let created = create_conversation(db.pool(), &thread).await.unwrap();
        assert!(!created.is_lead());

        let duplicate = create_conversation(db.pool(), &thread).await;
        assert!(matches!(
            duplicate,
            Err(DatabaseError::AlreadyExists { entity: "Conversation", .. })
        ));

        // Leads never carry a channel, so any number of them may share a name.
        for _ in 0..2 {
            let lead = create_conversation(
                db.pool(),
                &NewConversation {
                    user_id: user.id,
                    partner_name: "Coach".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
            assert!(lead.is_lead());
        }

        update_conversation(
            db.pool(),
            created.id,
            &ConversationUpdate {
                partner_name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let found = find_by_channel(db.pool(), user.id, "whatsapp")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.partner_name, "Renamed");
        assert!(find_by_channel(db.pool(), user.id, "sms").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_partner() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;

        assert!(find_by_partner(db.pool(), user.id, "Dana").await.unwrap().is_none());

        let created = create_conversation(
            db.pool(),
            &NewConversation {
                user_id: user.id,
                partner_name: "Dana".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let found = find_by_partner(db.pool(), user.id, "Dana").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }
}
