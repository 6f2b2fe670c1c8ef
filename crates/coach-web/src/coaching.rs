//! Rule-based coaching: per-stage advice and Aura's keyword chat replies.

use coach_brain::{ConversationAnalysis, EngagementLevel, Sentiment};
use database::{Conversation, EmotionalTemperature, LeadStatus, RelationshipStage};
use serde::Serialize;

/// Reply when the message mentions no lead and no known topic.
pub const DEFAULT_AURA_REPLY: &str = "I'm here to help you navigate your dating journey! \
You can ask me about specific people in your leads, strategies for different relationship \
stages, or request personalized advice based on personality types.";

const REENGAGE_SUGGESTION: &str = "Consider sending a thoughtful re-engagement message or \
focus your energy on more active leads.";

/// What to focus on in each relationship stage.
pub fn stage_advice(stage: RelationshipStage) -> &'static str {
    match stage {
        RelationshipStage::Lust => {
            "Focus on playful banter and creating emotional connection. \
             Ask engaging questions about their passions."
        }
        RelationshipStage::Labor => {
            "It's time to show genuine interest in their life goals. \
             Plan more meaningful dates and share your authentic self."
        }
        RelationshipStage::Loyal => {
            "Focus on building future plans together and maintaining the \
             emotional bond you've created."
        }
    }
}

/// Summary and next move for one lead, shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadAdvice {
    pub summary: String,
    pub suggestion: &'static str,
}

/// Advice for a lead, taking its status, stage and personality into account.
pub fn lead_advice(lead: &Conversation) -> LeadAdvice {
    if lead.status == LeadStatus::DeadLead {
        return LeadAdvice {
            summary: format!(
                "This connection has gone cold. Last activity was {}.",
                lead.last_active
            ),
            suggestion: REENGAGE_SUGGESTION,
        };
    }

    let profile = personality(lead).unwrap_or_else(|| "match".to_string());
    let summary = match lead.relationship_stage {
        RelationshipStage::Lust => format!(
            "You're in the attraction phase with this {profile}. Building initial chemistry and interest."
        ),
        RelationshipStage::Labor => format!(
            "Moving into the commitment phase. This {profile} values consistency and deeper connection."
        ),
        RelationshipStage::Loyal => format!(
            "You've reached the loyalty stage! This {profile} values long-term connection and stability."
        ),
    };

    LeadAdvice {
        summary,
        suggestion: stage_advice(lead.relationship_stage),
    }
}

/// Answer a chat message to Aura from the user's leads.
///
/// "dead lead" wins over names; otherwise the first lead whose partner first
/// name appears as a word in the message is discussed. Channel threads are
/// not leads and are never discussed.
pub fn aura_reply(message: &str, leads: &[Conversation]) -> String {
    let lowered = message.to_lowercase();

    if lowered.contains("dead lead") {
        let dead: Vec<&str> = leads
            .iter()
            .filter(|lead| lead.is_lead() && lead.status == LeadStatus::DeadLead)
            .map(|lead| first_name(&lead.partner_name))
            .collect();
        return dead_lead_reply(&dead);
    }

    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let mentioned = leads.iter().filter(|lead| lead.is_lead()).find(|lead| {
        let name = first_name(&lead.partner_name).to_lowercase();
        !name.is_empty() && words.contains(&name.as_str())
    });

    match mentioned {
        Some(lead) => lead_reply(lead),
        None => DEFAULT_AURA_REPLY.to_string(),
    }
}

fn dead_lead_reply(names: &[&str]) -> String {
    let subject = if names.is_empty() {
        "dead leads".to_string()
    } else {
        format!("dead leads like {}", names.join(" and "))
    };
    format!(
        "For {subject}, you have two options: 1) Send a thoughtful re-engagement message \
         referencing something specific from your past conversation, or 2) Focus your energy on \
         active leads. The choice depends on how promising the initial connection was."
    )
}

fn lead_reply(lead: &Conversation) -> String {
    let name = first_name(&lead.partner_name);

    if lead.status == LeadStatus::DeadLead {
        return dead_lead_reply(&[name]);
    }

    let opener = match lead.relationship_stage {
        RelationshipStage::Lust => {
            format!("{name} is still in the Lust phase, perfect for building attraction!")
        }
        RelationshipStage::Labor => format!(
            "{name} seems to be in the Labor stage and is showing genuine interest in deeper connection."
        ),
        RelationshipStage::Loyal => {
            format!("{name} has reached the Loyal stage, congratulations!")
        }
    };

    match personality(lead) {
        Some(profile) => format!(
            "{opener} As a {profile}, {name} will respond to advice tailored to them. {}",
            stage_advice(lead.relationship_stage)
        ),
        None => format!("{opener} {}", stage_advice(lead.relationship_stage)),
    }
}

/// Emotional temperature implied by an analysis.
pub fn temperature_for(analysis: &ConversationAnalysis) -> EmotionalTemperature {
    match (analysis.engagement_level, analysis.sentiment) {
        (EngagementLevel::High, Sentiment::Positive) => EmotionalTemperature::Hot,
        (_, Sentiment::Positive) => EmotionalTemperature::Warm,
        (_, Sentiment::Negative) => EmotionalTemperature::Cold,
        (EngagementLevel::Low, Sentiment::Neutral) => EmotionalTemperature::Lukewarm,
        _ => EmotionalTemperature::Neutral,
    }
}

fn first_name(partner_name: &str) -> &str {
    partner_name.split_whitespace().next().unwrap_or_default()
}

/// "Leo ENFP", "Leo" or "ENFP".
fn personality(lead: &Conversation) -> Option<String> {
    let parts: Vec<&str> = [lead.star_sign.as_deref(), lead.mbti_type.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    (!parts.is_empty()).then(|| parts.join(" "))
}
