//! Error types for the AI clients.

use thiserror::Error;

/// Errors that can occur when calling an AI provider.
///
/// The public coaching helpers absorb these and fall back to canned text;
/// they surface only from the lower-level `run_flow` and `chat` calls.
#[derive(Debug, Error)]
pub enum BrainError {
    /// Provider is not configured (missing URL or key).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request never produced a response (connect, timeout, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// Provider answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be interpreted.
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

impl BrainError {
    /// Whether another attempt might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            BrainError::Network(_) => true,
            BrainError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(BrainError::Network("timed out".into()).is_retryable());
        assert!(BrainError::Api {
            status: 503,
            message: "busy".into()
        }
        .is_retryable());
        assert!(!BrainError::Api {
            status: 401,
            message: "bad key".into()
        }
        .is_retryable());
        assert!(!BrainError::ProcessingFailed("bad json".into()).is_retryable());
    }

    #[test]
    fn test_display() {
        let err = BrainError::Api {
            status: 500,
            message: "upstream exploded".into(),
        };
        assert_eq!(err.to_string(), "API error (500): upstream exploded");
    }
}
