//! Configuration types for twilio-client.

use std::env;
use std::time::Duration;

/// Default Twilio REST base URL.
pub const DEFAULT_API_URL: &str = "https://api.twilio.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Twilio messaging API.
///
/// A client whose config lacks any of account SID, auth token or sender
/// number runs in mock mode: sends succeed locally with a synthetic id.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Base URL of the REST API.
    pub api_url: String,
    /// Account SID (basic-auth user).
    pub account_sid: Option<String>,
    /// Auth token (basic-auth password).
    pub auth_token: Option<String>,
    /// Sender phone number in E.164 form, without channel prefix.
    pub from_number: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retries after a transport error or 5xx.
    pub max_retries: u32,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            account_sid: None,
            auth_token: None,
            from_number: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: 1,
        }
    }
}

fn env_any(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

impl TwilioConfig {
    /// Create a configuration with credentials against the given base URL.
    pub fn new(
        api_url: impl Into<String>,
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            account_sid: Some(account_sid.into()),
            auth_token: Some(auth_token.into()),
            from_number: Some(from_number.into()),
            ..Default::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// - `TWILIO_ACCOUNT_SID` or `TWILIO_SID`
    /// - `TWILIO_AUTH_TOKEN` or `TWILIO_TOKEN`
    /// - `TWILIO_PHONE_NUMBER` or `TWILIO_FROM_PHONE`
    /// - `TWILIO_API_URL` (default: https://api.twilio.com)
    /// - `TWILIO_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Self {
        let timeout = env::var("TWILIO_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_url: env_any(&["TWILIO_API_URL"]).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            account_sid: env_any(&["TWILIO_ACCOUNT_SID", "TWILIO_SID"]),
            auth_token: env_any(&["TWILIO_AUTH_TOKEN", "TWILIO_TOKEN"]),
            from_number: env_any(&["TWILIO_PHONE_NUMBER", "TWILIO_FROM_PHONE"]),
            timeout: Duration::from_secs(timeout),
            ..Default::default()
        }
    }

    /// Whether real sends are possible.
    pub fn is_configured(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.from_number.is_some()
    }

    /// Get the Messages resource URL, if an account SID is set.
    pub fn messages_url(&self) -> Option<String> {
        self.account_sid.as_ref().map(|sid| {
            format!(
                "{}/2010-04-01/Accounts/{}/Messages.json",
                self.api_url.trim_end_matches('/'),
                urlencoding::encode(sid)
            )
        })
    }
}
