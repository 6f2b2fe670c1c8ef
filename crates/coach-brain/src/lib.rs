//! AI clients for LoveCoach.
//!
//! Two providers back the coaching features:
//!
//! - [`LangflowClient`] runs Langflow flows for conversation analysis,
//!   conversation starters, reply suggestions and profile reviews.
//! - [`MistralClient`] asks a Mistral chat model for Aura's dating advice.
//!
//! Both clients degrade instead of failing. Without configuration they return
//! canned mock answers; on provider errors the coaching helpers return fixed
//! fallback text. Requests carry a timeout and are retried once on transport
//! errors and 5xx responses.
//!
//! # Usage
//!
//! ```rust,no_run
//! use coach_brain::{HistoryTurn, LangflowClient, MistralClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let langflow = LangflowClient::from_env()?;
//!     let starter = langflow.generate_conversation_starter("Loves hiking and jazz").await;
//!
//!     let mistral = MistralClient::from_env()?;
//!     let history = [HistoryTurn::new(true, "I matched with someone new")];
//!     let advice = mistral.generate_dating_advice("What should I say first?", &history).await;
//!     println!("{starter}\n{advice}");
//!     Ok(())
//! }
//! ```

pub mod analysis;
mod api_types;
mod config;
mod error;
mod http;
mod langflow;
mod mistral;

pub use analysis::{ConversationAnalysis, EngagementLevel, ProfileAnalysis, Sentiment};
pub use api_types::{ChatMessage, FlowRequest, FlowResponse, FlowResult};
pub use config::{LangflowConfig, MistralConfig, AURA_SYSTEM_PROMPT};
pub use error::BrainError;
pub use langflow::{flows, LangflowClient};
pub use mistral::{HistoryTurn, MistralClient};
