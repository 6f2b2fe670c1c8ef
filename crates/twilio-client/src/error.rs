//! Error types for twilio-client.

use thiserror::Error;

/// Errors that can occur when talking to the Twilio API.
#[derive(Debug, Error)]
pub enum TwilioError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response from the API.
    #[error("Twilio error {status}: {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    /// Invalid or missing configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TwilioError {
    /// Whether another attempt might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            TwilioError::Http(e) => !e.is_builder(),
            TwilioError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
