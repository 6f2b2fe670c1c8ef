//! Twilio messaging client library.
//!
//! This crate provides a Rust client for the Twilio Messages API. It supports:
//!
//! - Sending SMS and WhatsApp messages
//! - LoveCoach message templates (daily tip, reminder, emergency rescue)
//! - Parsing inbound WhatsApp webhooks and delivery-status callbacks
//!
//! Without credentials the client runs in mock mode: sends are logged and
//! reported as successful with a synthetic id.
//!
//! # Example
//!
//! ```no_run
//! use twilio_client::{parse_incoming, TwilioClient, WebhookPayload};
//!
//! # async fn example() -> Result<(), twilio_client::TwilioError> {
//! let client = TwilioClient::from_env()?;
//!
//! // Send a daily tip by SMS
//! let outcome = client.send_daily_tip("+15550001111", "Ask open-ended questions.").await;
//! println!("sent: {} ({:?})", outcome.success, outcome.sid);
//!
//! // Handle a webhook post
//! let payload = WebhookPayload {
//!     from: Some("whatsapp:+15550001111".to_string()),
//!     body: Some("hi".to_string()),
//!     ..Default::default()
//! };
//! if let Some(message) = parse_incoming(&payload) {
//!     client.send_whatsapp(&message.from, "Hey! I'm Aura.").await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod client;
pub mod config;
pub mod error;
pub mod templates;
pub mod types;

pub use channel::{strip_whatsapp_prefix, with_whatsapp_prefix, Channel};
pub use client::TwilioClient;
pub use config::TwilioConfig;
pub use error::TwilioError;
pub use types::*;
