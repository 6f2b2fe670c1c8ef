//! Types for sending messages.

use serde::{Deserialize, Serialize};

/// Result of a send attempt as reported to callers.
///
/// Sends never return `Err`; a provider failure is `success: false` with the
/// provider's error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    /// A successful send with the provider's message id.
    pub fn sent(sid: impl Into<String>) -> Self {
        Self {
            success: true,
            sid: Some(sid.into()),
            error: None,
        }
    }

    /// A failed send.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            sid: None,
            error: Some(error.into()),
        }
    }
}

/// Message resource returned by `POST .../Messages.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResource {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Error body returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_value(SendOutcome::sent("SM1")).unwrap(),
            json!({ "success": true, "sid": "SM1" })
        );
        assert_eq!(
            serde_json::to_value(SendOutcome::failed("bad number")).unwrap(),
            json!({ "success": false, "error": "bad number" })
        );
    }

    #[test]
    fn test_message_resource_parses() {
        let resource: MessageResource = serde_json::from_value(json!({
            "sid": "SMabc",
            "status": "queued",
            "error_code": null,
            "body": "hi",
            "num_segments": "1"
        }))
        .unwrap();
        assert_eq!(resource.sid, "SMabc");
        assert_eq!(resource.status.as_deref(), Some("queued"));
        assert!(resource.error_code.is_none());
    }
}
