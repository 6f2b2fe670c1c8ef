//! Coaching analysis results and their canned variants.

use serde::{Deserialize, Serialize};

/// How engaged the partner appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementLevel {
    Low,
    Medium,
    High,
}

/// Overall tone of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Structured read of a dating conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationAnalysis {
    pub engagement_level: EngagementLevel,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    pub suggestions: Vec<String>,
    pub next_steps: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ConversationAnalysis {
    /// Canned analysis returned when Langflow is not configured.
    pub fn mock() -> Self {
        Self {
            engagement_level: EngagementLevel::High,
            topics: strings(&["outdoor_activities", "travel", "food"]),
            sentiment: Sentiment::Positive,
            suggestions: strings(&[
                "Ask about her favorite hiking trails",
                "Share a travel story of your own",
                "Suggest meeting for coffee to continue the conversation",
            ]),
            next_steps: strings(&[
                "Ask for her phone number",
                "Propose a specific date activity",
                "Share more personal interests",
            ]),
        }
    }

    /// Neutral analysis used when the provider fails or answers nonsense.
    pub fn fallback() -> Self {
        Self {
            engagement_level: EngagementLevel::Medium,
            topics: strings(&["general"]),
            sentiment: Sentiment::Neutral,
            suggestions: strings(&["Continue the conversation with open-ended questions"]),
            next_steps: strings(&["Share more about your interests"]),
        }
    }
}

/// Dating profile review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    /// 0..=100.
    pub score: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub photo_feedback: Vec<String>,
}

impl ProfileAnalysis {
    /// Canned review returned when Langflow is not configured.
    pub fn mock() -> Self {
        Self {
            score: 85,
            strengths: strings(&[
                "Great variety of photos",
                "Interesting hobbies",
                "Clear about what you want",
            ]),
            improvements: strings(&["Add more photos with friends", "Write more about your career"]),
            photo_feedback: strings(&[
                "Main photo is great",
                "Consider adding a group photo",
                "Action shots work well",
            ]),
        }
    }

    /// Review used when the provider fails or answers nonsense.
    pub fn fallback() -> Self {
        Self {
            score: 70,
            strengths: strings(&["Well-written bio"]),
            improvements: strings(&["Add more photos"]),
            photo_feedback: strings(&["Photos look good"]),
        }
    }
}

/// Opener returned when Langflow is not configured.
pub const MOCK_STARTER: &str =
    "I noticed you love hiking! What's been your favorite trail discovery this year?";

/// Opener used when the flow fails or returns nothing.
pub const FALLBACK_STARTER: &str = "Hey! How's your day going?";

/// Reply suggestion returned when Langflow is not configured.
pub const MOCK_SUGGESTION: &str = "That sounds incredible! I've always wanted to visit Yosemite. \
What was your favorite part of the hike?";

/// Reply suggestion used when the flow returns nothing.
pub const EMPTY_SUGGESTION: &str = "That's interesting! Tell me more about that.";

/// Reply suggestion used when the flow fails.
pub const FALLBACK_SUGGESTION: &str = "That's really interesting! I'd love to hear more about that.";

/// Advice text when Mistral is not configured.
pub const UNCONFIGURED_ADVICE: &str = "I'm Aura, your AI dating coach! I'm here to help you with \
relationship advice. Ask me about dating strategies, conversation tips, or any relationship \
questions you have.";

/// Advice text when the Mistral call fails.
pub const FAILED_ADVICE: &str = "I'm having trouble connecting right now, but I'm here to help \
with dating advice! Try asking me about conversation starters, date ideas, or relationship tips.";

/// Advice text when Mistral answers with no content.
pub const EMPTY_ADVICE: &str =
    "I'm here to help with your dating questions! Could you please rephrase your question?";
