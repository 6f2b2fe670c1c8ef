//! Demo data for a fresh database.

use serde_json::json;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{
    LeadStatus, NewCoachingTip, NewUser, RelationshipStage, StatsUpdate, TipType, User,
    WorkflowStatus,
};
use crate::{coaching_tip, stats, user};

struct DemoLead {
    partner_name: &'static str,
    partner_image: &'static str,
    last_message: &'static str,
    /// SQLite date modifier applied to "now" for `last_active`.
    last_active: &'static str,
    created: &'static str,
    status: LeadStatus,
    stage: RelationshipStage,
    star_sign: &'static str,
    mbti_type: &'static str,
    response_rate: i64,
}

const DEMO_LEADS: &[DemoLead] = &[
    DemoLead {
        partner_name: "Sarah M.",
        partner_image: "https://images.unsplash.com/photo-1494790108755-2616b9f5c5c3?w=100&h=100&fit=crop&crop=face",
        last_message: "That sounds like a great restaurant! I'd love to try...",
        last_active: "-2 hours",
        created: "-3 days",
        status: LeadStatus::ActiveLead,
        stage: RelationshipStage::Labor,
        star_sign: "Leo",
        mbti_type: "ENFP",
        response_rate: 85,
    },
    DemoLead {
        partner_name: "Alex R.",
        partner_image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop&crop=face",
        last_message: "Hey, thanks for last night. Had fun!",
        last_active: "-5 hours",
        created: "-5 days",
        status: LeadStatus::ActiveLead,
        stage: RelationshipStage::Lust,
        star_sign: "Scorpio",
        mbti_type: "INTJ",
        response_rate: 65,
    },
    DemoLead {
        partner_name: "Emma K.",
        partner_image: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=100&h=100&fit=crop&crop=face",
        last_message: "I had such a great time yesterday! When can we...",
        last_active: "-1 days",
        created: "-7 days",
        status: LeadStatus::ActiveLead,
        stage: RelationshipStage::Loyal,
        star_sign: "Gemini",
        mbti_type: "ESFJ",
        response_rate: 92,
    },
    DemoLead {
        partner_name: "Jordan P.",
        partner_image: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop&crop=face",
        last_message: "Seen two weeks ago",
        last_active: "-14 days",
        created: "-20 days",
        status: LeadStatus::DeadLead,
        stage: RelationshipStage::Lust,
        star_sign: "Virgo",
        mbti_type: "ISTP",
        response_rate: 20,
    },
];

/// Insert the demo account and its dashboard data.
///
/// Does nothing unless the users table is empty. Returns the demo user when
/// data was inserted.
pub async fn seed_demo_data(pool: &SqlitePool, hash_cost: u32) -> Result<Option<User>> {
    if user::count_users(pool).await? > 0 {
        tracing::debug!("Users present, skipping demo seed");
        return Ok(None);
    }

    let demo = user::create_user(
        pool,
        &NewUser {
            username: "jordan_doe".to_string(),
            password: "password123".to_string(),
            first_name: "Jordan".to_string(),
            last_name: "Doe".to_string(),
            phone: Some("+1234567890".to_string()),
            sms_enabled: Some(true),
        },
        hash_cost,
    )
    .await?;

    let mut lead_ids = Vec::with_capacity(DEMO_LEADS.len());
    for lead in DEMO_LEADS {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO conversations (
                user_id, partner_name, partner_image, last_message, last_active, status,
                relationship_stage, star_sign, mbti_type, response_rate, created_at
            )
            VALUES (?, ?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now', ?), ?, ?, ?, ?, ?,
                strftime('%Y-%m-%dT%H:%M:%fZ', 'now', ?))
            RETURNING id
            "#,
        )
        .bind(demo.id)
        .bind(lead.partner_name)
        .bind(lead.partner_image)
        .bind(lead.last_message)
        .bind(lead.last_active)
        .bind(lead.status)
        .bind(lead.stage)
        .bind(lead.star_sign)
        .bind(lead.mbti_type)
        .bind(lead.response_rate)
        .bind(lead.created)
        .fetch_one(pool)
        .await?;
        lead_ids.push(id);
    }

    let sarah = lead_ids[0];
    let emma = lead_ids[2];

    // Inserted directly so the lead keeps its seeded last message.
    for (content, is_from_user, ago) in [
        ("Hey Sarah! How was your weekend hiking trip?", true, "-180 minutes"),
        (
            "It was amazing! The views from Half Dome were incredible. Have you been to Yosemite?",
            false,
            "-150 minutes",
        ),
    ] {
        sqlx::query(
            r#"
            INSERT INTO messages (conversation_id, content, is_from_user, timestamp)
            VALUES (?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now', ?))
            "#,
        )
        .bind(sarah)
        .bind(content)
        .bind(is_from_user)
        .bind(ago)
        .execute(pool)
        .await?;
    }

    let tips = [
        NewCoachingTip {
            user_id: demo.id,
            tip_type: TipType::ConversationStarter,
            title: "Conversation Starter Tip".to_string(),
            content: "Based on Sarah's profile, ask about her recent hiking trip to Yosemite. \
                      She mentioned loving outdoor adventures."
                .to_string(),
            conversation_id: Some(sarah),
            is_read: false,
        },
        NewCoachingTip {
            user_id: demo.id,
            tip_type: TipType::ResponsePattern,
            title: "Response Pattern".to_string(),
            content: "You get 40% better responses when you ask open-ended questions. \
                      Try \"What's been the highlight of your week?\""
                .to_string(),
            conversation_id: None,
            is_read: false,
        },
        NewCoachingTip {
            user_id: demo.id,
            tip_type: TipType::DateSuggestion,
            title: "Date Suggestion".to_string(),
            content: "Emma loves art galleries. The MOMA has a new exhibition this weekend - \
                      perfect for a creative date!"
                .to_string(),
            conversation_id: Some(emma),
            is_read: false,
        },
    ];
    for tip in &tips {
        coaching_tip::create_tip(pool, tip).await?;
    }

    let workflows = [
        (
            "Profile Analysis",
            WorkflowStatus::Completed,
            "-10 minutes",
            Some(json!({ "score": 85, "insights": ["Strong profile", "Good photo variety"] })),
        ),
        ("Conversation Processing", WorkflowStatus::Running, "-2 minutes", None),
        ("Recommendation Engine", WorkflowStatus::Queued, "-5 minutes", None),
    ];
    for (name, status, ago, results) in workflows {
        sqlx::query(
            r#"
            INSERT INTO workflows (user_id, name, status, last_updated, results)
            VALUES (?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now', ?), ?)
            "#,
        )
        .bind(demo.id)
        .bind(name)
        .bind(status)
        .bind(ago)
        .bind(Json(results))
        .execute(pool)
        .await?;
    }

    stats::upsert_stats(
        pool,
        demo.id,
        &StatsUpdate {
            active_conversations: Some(12),
            response_rate: Some(78),
            coaching_tips_sent: Some(47),
            success_score: Some(84),
        },
    )
    .await?;

    tracing::info!(user_id = demo.id, leads = lead_ids.len(), "Seeded demo data");
    Ok(Some(demo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;
    use crate::test_support::{test_db, test_user};
    use crate::{conversation, message, workflow};

    #[tokio::test]
    async fn test_seed_populates_dashboard() {
        let db = test_db().await;

        let demo = seed_demo_data(db.pool(), 4).await.unwrap().unwrap();
        assert_eq!(demo.username, "jordan_doe");
        assert_eq!(demo.id, 1);

        let leads = conversation::list_conversations(db.pool(), demo.id).await.unwrap();
        let names: Vec<&str> = leads.iter().map(|c| c.partner_name.as_str()).collect();
        assert_eq!(names, vec!["Sarah M.", "Alex R.", "Emma K.", "Jordan P."]);
        assert_eq!(leads[3].status, LeadStatus::DeadLead);
        assert_eq!(leads[0].relationship_stage, RelationshipStage::Labor);

        let messages = message::list_messages(db.pool(), leads[0].id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_from_user);
        assert_eq!(
            leads[0].last_message.as_deref(),
            Some("That sounds like a great restaurant! I'd love to try...")
        );

        let tips = coaching_tip::list_tips(db.pool(), demo.id).await.unwrap();
        assert_eq!(tips.len(), 3);

        let workflows = workflow::list_workflows(db.pool(), demo.id).await.unwrap();
        let names: Vec<&str> = workflows.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Conversation Processing", "Recommendation Engine", "Profile Analysis"]
        );
        assert_eq!(workflows[2].results.as_ref().unwrap()["score"], 85);

        let stats = stats::get_stats(db.pool(), demo.id).await.unwrap().unwrap();
        assert_eq!(stats.success_score, 84);
    }

    #[tokio::test]
    async fn test_seed_skips_non_empty_database() {
        let db = test_db().await;
        test_user(&db, "someone").await;

        assert!(seed_demo_data(db.pool(), 4).await.unwrap().is_none());
        assert!(user::get_user_by_username(db.pool(), "jordan_doe").await.is_err());
    }
}
