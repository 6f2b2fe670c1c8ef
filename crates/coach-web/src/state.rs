//! Application state shared across handlers.

use coach_brain::{LangflowClient, MistralClient};
use database::Database;
use twilio_client::TwilioClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Langflow workflow runner.
    pub langflow: LangflowClient,
    /// Mistral chat client behind Aura.
    pub mistral: MistralClient,
    /// SMS and WhatsApp sender.
    pub twilio: TwilioClient,
    /// bcrypt cost for passwords created by the server.
    pub hash_cost: u32,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        db: Database,
        langflow: LangflowClient,
        mistral: MistralClient,
        twilio: TwilioClient,
        hash_cost: u32,
    ) -> Self {
        Self {
            db,
            langflow,
            mistral,
            twilio,
            hash_cost,
        }
    }
}
