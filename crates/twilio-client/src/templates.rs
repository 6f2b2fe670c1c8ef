//! Outbound message templates.

/// Daily coaching tip.
pub fn daily_tip(tip: &str) -> String {
    format!(
        "💡 Daily Dating Tip: {}\n\nReply STOP to unsubscribe from LoveCoach AI",
        tip
    )
}

/// Nudge to answer a partner.
pub fn response_reminder(partner_name: &str) -> String {
    format!(
        "👋 Gentle reminder: {} sent you a message! Keep the conversation flowing.\n\nReply HELP for suggestions",
        partner_name
    )
}

/// Suggested line to rescue a stalling conversation.
pub fn emergency_help(suggestion: &str) -> String {
    format!(
        "🆘 Emergency Conversation Rescue:\n\n\"{}\"\n\nYou've got this! 💪",
        suggestion
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates() {
        assert_eq!(
            daily_tip("Ask open questions."),
            "💡 Daily Dating Tip: Ask open questions.\n\nReply STOP to unsubscribe from LoveCoach AI"
        );
        assert!(response_reminder("Dana").starts_with("👋 Gentle reminder: Dana sent you a message!"));
        assert_eq!(
            emergency_help("How was the hike?"),
            "🆘 Emergency Conversation Rescue:\n\n\"How was the hike?\"\n\nYou've got this! 💪"
        );
    }
}
