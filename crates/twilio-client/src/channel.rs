//! Delivery channels and the WhatsApp address prefix.

/// Address prefix Twilio uses for WhatsApp endpoints.
pub const WHATSAPP_PREFIX: &str = "whatsapp:";

/// Channel a message travels over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sms,
    WhatsApp,
}

impl Channel {
    /// Format a phone number as a Twilio address on this channel.
    pub fn address(&self, number: &str) -> String {
        match self {
            Channel::Sms => strip_whatsapp_prefix(number).to_string(),
            Channel::WhatsApp => with_whatsapp_prefix(number),
        }
    }

    /// Prefix for synthetic ids handed out in mock mode.
    pub(crate) fn mock_sid_prefix(&self) -> &'static str {
        match self {
            Channel::Sms => "mock_sid_",
            Channel::WhatsApp => "mock_whatsapp_sid_",
        }
    }
}

/// Add the WhatsApp prefix unless already present.
pub fn with_whatsapp_prefix(number: &str) -> String {
    let number = number.trim();
    if number.starts_with(WHATSAPP_PREFIX) {
        number.to_string()
    } else {
        format!("{}{}", WHATSAPP_PREFIX, number)
    }
}

/// Remove the WhatsApp prefix if present.
pub fn strip_whatsapp_prefix(address: &str) -> &str {
    let address = address.trim();
    address.strip_prefix(WHATSAPP_PREFIX).unwrap_or(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_idempotent() {
        assert_eq!(with_whatsapp_prefix("+15550001111"), "whatsapp:+15550001111");
        assert_eq!(
            with_whatsapp_prefix("whatsapp:+15550001111"),
            "whatsapp:+15550001111"
        );
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip_whatsapp_prefix("whatsapp:+15550001111"), "+15550001111");
        assert_eq!(strip_whatsapp_prefix("+15550001111"), "+15550001111");
        assert_eq!(strip_whatsapp_prefix(" whatsapp:+1 "), "+1");
    }

    #[test]
    fn test_channel_address() {
        assert_eq!(Channel::Sms.address("whatsapp:+1555"), "+1555");
        assert_eq!(Channel::WhatsApp.address("+1555"), "whatsapp:+1555");
    }
}
