//! Twilio REST client.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::channel::Channel;
use crate::config::TwilioConfig;
use crate::error::TwilioError;
use crate::templates;
use crate::types::{ApiErrorBody, MessageResource, SendOutcome};

const RETRY_DELAY: Duration = Duration::from_millis(200);

/// Client for sending SMS and WhatsApp messages through Twilio.
#[derive(Debug, Clone)]
pub struct TwilioClient {
    http: Client,
    config: TwilioConfig,
}

impl TwilioClient {
    /// Create a client with the given configuration.
    pub fn new(config: TwilioConfig) -> Result<Self, TwilioError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TwilioError::Http)?;

        if config.is_configured() {
            info!(from = config.from_number.as_deref().unwrap_or_default(), "Twilio client configured");
        } else {
            warn!("Twilio not configured, messages will be logged instead of sent");
        }

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, TwilioError> {
        Self::new(TwilioConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &TwilioConfig {
        &self.config
    }

    /// Whether real sends are possible.
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Our sender number, if configured.
    pub fn from_number(&self) -> Option<&str> {
        self.config.from_number.as_deref()
    }

    /// Create a message resource, retrying transport errors and 5xx.
    pub async fn create_message(
        &self,
        channel: Channel,
        to: &str,
        body: &str,
    ) -> Result<MessageResource, TwilioError> {
        let (Some(url), Some(sid), Some(token), Some(from)) = (
            self.config.messages_url(),
            self.config.account_sid.as_deref(),
            self.config.auth_token.as_deref(),
            self.config.from_number.as_deref(),
        ) else {
            return Err(TwilioError::Config("Twilio credentials not set".to_string()));
        };

        let form = [
            ("To", channel.address(to)),
            ("From", channel.address(from)),
            ("Body", body.to_string()),
        ];

        let mut attempt = 0;
        loop {
            match self.post_form(&url, sid, token, &form).await {
                Ok(resource) => return Ok(resource),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(attempt, error = %err, "Twilio request failed, retrying");
                    tokio::time::sleep(RETRY_DELAY * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn post_form(
        &self,
        url: &str,
        sid: &str,
        token: &str,
        form: &[(&str, String)],
    ) -> Result<MessageResource, TwilioError> {
        let response = self
            .http
            .post(url)
            .basic_auth(sid, Some(token))
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str::<ApiErrorBody>(&text).ok();
            return Err(TwilioError::Api {
                status: status.as_u16(),
                code: body.as_ref().and_then(|b| b.code),
                message: body.and_then(|b| b.message).unwrap_or(text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Send a message, reporting the outcome instead of an error.
    ///
    /// Unconfigured clients log the message and report success with a
    /// synthetic `mock_*` id.
    pub async fn send(&self, channel: Channel, to: &str, body: &str) -> SendOutcome {
        if !self.is_configured() {
            let sid = format!("{}{}", channel.mock_sid_prefix(), now_millis());
            info!(to, ?channel, sid = %sid, body, "Twilio not configured, message not sent");
            return SendOutcome::sent(sid);
        }

        match self.create_message(channel, to, body).await {
            Ok(resource) => {
                debug!(to, ?channel, sid = %resource.sid, "Message accepted");
                SendOutcome::sent(resource.sid)
            }
            Err(TwilioError::Api { message, status, .. }) => {
                error!(to, ?channel, status, error = %message, "Twilio rejected message");
                SendOutcome::failed(message)
            }
            Err(e) => {
                error!(to, ?channel, error = %e, "Failed to send message");
                SendOutcome::failed(e.to_string())
            }
        }
    }

    /// Send an SMS.
    pub async fn send_sms(&self, to: &str, body: &str) -> SendOutcome {
        self.send(Channel::Sms, to, body).await
    }

    /// Send a WhatsApp message.
    pub async fn send_whatsapp(&self, to: &str, body: &str) -> SendOutcome {
        self.send(Channel::WhatsApp, to, body).await
    }

    /// Send the daily tip SMS.
    pub async fn send_daily_tip(&self, phone: &str, tip: &str) -> SendOutcome {
        self.send_sms(phone, &templates::daily_tip(tip)).await
    }

    /// Send a reminder to answer `partner_name`.
    pub async fn send_response_reminder(&self, phone: &str, partner_name: &str) -> SendOutcome {
        self.send_sms(phone, &templates::response_reminder(partner_name)).await
    }

    /// Send an emergency rescue suggestion.
    pub async fn send_emergency_help(&self, phone: &str, suggestion: &str) -> SendOutcome {
        self.send_sms(phone, &templates::emergency_help(suggestion)).await
    }
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_sends_are_mocked() {
        let client = TwilioClient::new(TwilioConfig::default()).unwrap();
        assert!(!client.is_configured());

        let sms = client.send_sms("+15550001111", "hello").await;
        assert!(sms.success);
        assert!(sms.sid.unwrap().starts_with("mock_sid_"));

        let whatsapp = client.send_whatsapp("+15550001111", "hello").await;
        assert!(whatsapp.success);
        assert!(whatsapp.sid.unwrap().starts_with("mock_whatsapp_sid_"));
    }

    #[tokio::test]
    async fn test_create_message_requires_credentials() {
        let client = TwilioClient::new(TwilioConfig::default()).unwrap();
        let err = client
            .create_message(Channel::Sms, "+15550001111", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, TwilioError::Config(_)));
    }
}
