//! Database models.
//!
//! Records are returned by the repository functions; `New*` drafts are the
//! inputs to `create_*`, and `*Update` partials are shallow-merged by
//! `update_*` (a `None` field leaves the stored value untouched).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Relationship-progress classification of a lead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum RelationshipStage {
    /// Early attraction.
    #[default]
    Lust,
    /// Building a deeper connection.
    Labor,
    /// Committed.
    Loyal,
}

impl RelationshipStage {
    /// Wire name of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStage::Lust => "lust",
            RelationshipStage::Labor => "labor",
            RelationshipStage::Loyal => "loyal",
        }
    }
}

/// Whether a lead is still being pursued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    ActiveLead,
    DeadLead,
}

/// Emotional temperature of a conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum EmotionalTemperature {
    #[default]
    Neutral,
    Cold,
    Lukewarm,
    Warm,
    Hot,
    Confused,
}

/// Kind of coaching tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TipType {
    ConversationStarter,
    ResponsePattern,
    DateSuggestion,
    General,
}

/// Kind of outbound message recorded in the SMS log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum SmsType {
    DailyTip,
    Reminder,
    EmergencyHelp,
    WhatsappChat,
}

/// Delivery status of an SMS log entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum SmsStatus {
    #[default]
    Pending,
    Sent,
    Failed,
}

/// Status of an externally executed AI workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum WorkflowStatus {
    #[default]
    Queued,
    Running,
    Completed,
    Failed,
}

impl WorkflowStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Queued => "queued",
            WorkflowStatus::Running => "running",
            WorkflowStatus::Completed => "completed",
            WorkflowStatus::Failed => "failed",
        }
    }
}

/// A registered user. The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub sms_enabled: bool,
    pub created_at: String,
}

/// Signup draft. The plaintext password is hashed before storage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub sms_enabled: Option<bool>,
}

/// Partial user update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub sms_enabled: Option<bool>,
}

/// A lead: the user's conversation with one dating prospect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: i64,
    pub user_id: i64,
    pub partner_name: String,
    pub partner_image: Option<String>,
    pub last_message: Option<String>,
    pub last_active: String,
    pub status: LeadStatus,
    pub relationship_stage: RelationshipStage,
    pub star_sign: Option<String>,
    pub mbti_type: Option<String>,
    pub emotional_temperature: EmotionalTemperature,
    #[sqlx(json)]
    pub red_flags: Vec<String>,
    #[sqlx(json)]
    pub green_flags: Vec<String>,
    pub ai_suggested_next_step: Option<String>,
    pub response_rate: i64,
    pub created_at: String,
    /// Messaging channel of a coaching thread; `None` for dating leads.
    pub channel: Option<String>,
}

impl Conversation {
    /// Whether this row is a dating lead rather than a channel thread.
    pub fn is_lead(&self) -> bool {
        self.channel.is_none()
    }
}

/// Conversation draft; omitted fields take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConversation {
    pub user_id: i64,
    pub partner_name: String,
    pub partner_image: Option<String>,
    pub last_message: Option<String>,
    pub status: Option<LeadStatus>,
    pub relationship_stage: Option<RelationshipStage>,
    pub star_sign: Option<String>,
    pub mbti_type: Option<String>,
    pub emotional_temperature: Option<EmotionalTemperature>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub green_flags: Vec<String>,
    pub ai_suggested_next_step: Option<String>,
    pub response_rate: Option<i64>,
    #[serde(skip)]
    pub channel: Option<String>,
}

/// Partial conversation update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationUpdate {
    pub partner_name: Option<String>,
    pub partner_image: Option<String>,
    pub last_message: Option<String>,
    pub status: Option<LeadStatus>,
    pub relationship_stage: Option<RelationshipStage>,
    pub star_sign: Option<String>,
    pub mbti_type: Option<String>,
    pub emotional_temperature: Option<EmotionalTemperature>,
    pub red_flags: Option<Vec<String>>,
    pub green_flags: Option<Vec<String>>,
    pub ai_suggested_next_step: Option<String>,
    pub response_rate: Option<i64>,
}

/// A single message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub content: String,
    pub is_from_user: bool,
    pub timestamp: String,
    pub ai_suggested: bool,
}

/// Message draft.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub conversation_id: i64,
    pub content: String,
    pub is_from_user: bool,
    #[serde(default)]
    pub ai_suggested: bool,
}

/// A stored piece of coaching advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CoachingTip {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub tip_type: TipType,
    pub title: String,
    pub content: String,
    pub conversation_id: Option<i64>,
    pub is_read: bool,
    pub created_at: String,
}

/// Coaching tip draft.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoachingTip {
    pub user_id: i64,
    #[serde(rename = "type")]
    pub tip_type: TipType,
    pub title: String,
    pub content: String,
    pub conversation_id: Option<i64>,
    #[serde(default)]
    pub is_read: bool,
}

/// Audit record of an outbound SMS or WhatsApp message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SmsLog {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub message_type: SmsType,
    pub content: String,
    pub phone: String,
    pub status: SmsStatus,
    pub provider_sid: Option<String>,
    pub sent_at: Option<String>,
    pub created_at: String,
}

/// SMS log draft.
#[derive(Debug, Clone)]
pub struct NewSmsLog {
    pub user_id: i64,
    pub message_type: SmsType,
    pub content: String,
    pub phone: String,
    pub status: SmsStatus,
    pub provider_sid: Option<String>,
}

impl NewSmsLog {
    /// A pending log entry with no provider id yet.
    pub fn pending(
        user_id: i64,
        message_type: SmsType,
        content: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            message_type,
            content: content.into(),
            phone: phone.into(),
            status: SmsStatus::Pending,
            provider_sid: None,
        }
    }
}

/// Partial SMS log update (delivery transitions).
#[derive(Debug, Clone, Default)]
pub struct SmsLogUpdate {
    pub status: Option<SmsStatus>,
    pub provider_sid: Option<String>,
}

/// A unit of external AI processing mirrored in the store.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub status: WorkflowStatus,
    pub last_updated: String,
    #[sqlx(json)]
    pub results: Option<serde_json::Value>,
}

/// Workflow draft.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkflow {
    pub user_id: i64,
    pub name: String,
    pub status: Option<WorkflowStatus>,
    pub results: Option<serde_json::Value>,
}

/// Partial workflow update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowUpdate {
    pub name: Option<String>,
    pub status: Option<WorkflowStatus>,
    pub results: Option<serde_json::Value>,
}

/// Per-user dashboard counters. `success_score` is fixed point (x10).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub id: i64,
    pub user_id: i64,
    pub active_conversations: i64,
    pub response_rate: i64,
    pub coaching_tips_sent: i64,
    pub success_score: i64,
    pub updated_at: String,
}

/// Partial stats update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsUpdate {
    pub active_conversations: Option<i64>,
    pub response_rate: Option<i64>,
    pub coaching_tips_sent: Option<i64>,
    pub success_score: Option<i64>,
}
