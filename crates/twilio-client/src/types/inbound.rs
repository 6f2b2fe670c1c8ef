//! Types for inbound webhooks.

use serde::Deserialize;

use crate::channel::strip_whatsapp_prefix;

/// Form fields Twilio posts to the incoming-message webhook.
///
/// Every field is optional so that a malformed post still deserializes and
/// can be rejected by [`parse_incoming`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "From", default)]
    pub from: Option<String>,
    #[serde(rename = "To", default)]
    pub to: Option<String>,
    #[serde(rename = "Body", default)]
    pub body: Option<String>,
    #[serde(rename = "MessageSid", default)]
    pub message_sid: Option<String>,
}

/// A validated inbound message with channel prefixes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Sender phone number.
    pub from: String,
    /// Our receiving number (empty if absent).
    pub to: String,
    pub body: String,
    pub message_sid: Option<String>,
}

/// Validate a webhook payload.
///
/// Returns `None` when the sender or the body is missing or blank.
pub fn parse_incoming(payload: &WebhookPayload) -> Option<IncomingMessage> {
    let from = strip_whatsapp_prefix(payload.from.as_deref().unwrap_or_default());
    let body = payload.body.as_deref().unwrap_or_default();

    if from.is_empty() || body.trim().is_empty() {
        return None;
    }

    Some(IncomingMessage {
        from: from.to_string(),
        to: strip_whatsapp_prefix(payload.to.as_deref().unwrap_or_default()).to_string(),
        body: body.to_string(),
        message_sid: payload
            .message_sid
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}

/// Delivery state derived from a provider status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
}

/// Form fields of a message status callback.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCallback {
    #[serde(rename = "MessageSid")]
    pub message_sid: String,
    #[serde(rename = "MessageStatus")]
    pub message_status: String,
    #[serde(rename = "ErrorCode", default)]
    pub error_code: Option<String>,
}

impl StatusCallback {
    /// Map the provider status onto our delivery states.
    pub fn delivery_status(&self) -> DeliveryStatus {
        match self.message_status.trim().to_ascii_lowercase().as_str() {
            "sent" | "delivered" | "read" => DeliveryStatus::Sent,
            "failed" | "undelivered" | "canceled" => DeliveryStatus::Failed,
            _ => DeliveryStatus::Pending,
        }
    }
}
