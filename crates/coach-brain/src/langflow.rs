//! Langflow workflow client.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::analysis::{
    ConversationAnalysis, ProfileAnalysis, EMPTY_SUGGESTION, FALLBACK_STARTER,
    FALLBACK_SUGGESTION, MOCK_STARTER, MOCK_SUGGESTION,
};
use crate::api_types::{FlowRequest, FlowResponse, FlowResult};
use crate::config::LangflowConfig;
use crate::error::BrainError;
use crate::http;

/// Flow ids used by the coaching helpers.
pub mod flows {
    pub const CONVERSATION_ANALYSIS: &str = "conversation-analysis";
    pub const CONVERSATION_STARTER: &str = "conversation-starter";
    pub const PROFILE_ANALYSIS: &str = "profile-analysis";
    pub const RESPONSE_GENERATOR: &str = "response-generator";
}

pub(crate) fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Client for running Langflow flows.
///
/// Without a URL and key every run returns a locally built mock response and
/// the coaching helpers return their canned mock results.
#[derive(Debug, Clone)]
pub struct LangflowClient {
    client: Client,
    config: LangflowConfig,
}

impl LangflowClient {
    /// Create a client with the given configuration.
    pub fn new(config: LangflowConfig) -> Result<Self, BrainError> {
        let client = http::build_client(config.timeout)?;

        if config.is_configured() {
            info!(
                url = config.api_url.as_deref().unwrap_or_default(),
                "Langflow client configured"
            );
        } else {
            warn!("Langflow not configured, using mock responses");
        }

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(LangflowConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &LangflowConfig {
        &self.config
    }

    /// Whether calls go to a real Langflow instance.
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Run a flow.
    ///
    /// Returns a mock response (`result.data.mock == true`) without touching
    /// the network when the client is unconfigured.
    pub async fn run_flow(
        &self,
        flow_id: &str,
        request: &FlowRequest,
    ) -> Result<FlowResponse, BrainError> {
        let (Some(base), Some(key)) = (&self.config.api_url, &self.config.api_key) else {
            debug!(flow_id, "Returning mock Langflow response");
            return Ok(FlowResponse {
                result: FlowResult {
                    message: "Mock response from Langflow workflow".to_string(),
                    result_type: "text".to_string(),
                    data: Some(json!({ "mock": true })),
                },
                session_id: format!("mock_session_{}", now_millis()),
            });
        };

        let url = format!("{}/api/v1/run/{}", base.trim_end_matches('/'), flow_id);
        debug!(flow_id, url = %url, "Running Langflow flow");

        let response = http::post_json(&self.client, &url, key, request, self.config.max_retries)
            .await?;

        response
            .json::<FlowResponse>()
            .await
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to parse response: {}", e)))
    }

    /// Analyze a conversation given as one line per message.
    ///
    /// Never fails: provider errors and unparseable output yield
    /// [`ConversationAnalysis::fallback`].
    pub async fn analyze_conversation(&self, messages: &[String]) -> ConversationAnalysis {
        let request = FlowRequest::new(messages.join("\n"), "chat")
            .tweak("analysis_type", "dating_conversation");

        match self.run_flow(flows::CONVERSATION_ANALYSIS, &request).await {
            Ok(response) if response.is_mock() => ConversationAnalysis::mock(),
            Ok(response) => parse_or_fallback(
                &response.result.message,
                flows::CONVERSATION_ANALYSIS,
                ConversationAnalysis::fallback,
            ),
            Err(e) => {
                error!(flow_id = flows::CONVERSATION_ANALYSIS, error = %e, "Conversation analysis failed");
                ConversationAnalysis::fallback()
            }
        }
    }

    /// Suggest an opening line for a partner's profile.
    pub async fn generate_conversation_starter(&self, profile_info: &str) -> String {
        let request = FlowRequest::new(profile_info, "text")
            .tweak("tone", "friendly")
            .tweak("style", "personalized");

        match self.run_flow(flows::CONVERSATION_STARTER, &request).await {
            Ok(response) if response.is_mock() => MOCK_STARTER.to_string(),
            Ok(response) => non_empty_or(response.result.message, FALLBACK_STARTER),
            Err(e) => {
                error!(flow_id = flows::CONVERSATION_STARTER, error = %e, "Starter generation failed");
                FALLBACK_STARTER.to_string()
            }
        }
    }

    /// Suggest a reply to the partner's latest message.
    pub async fn generate_response_suggestion(
        &self,
        conversation_context: &str,
        partner_message: &str,
    ) -> String {
        let input = format!(
            "Conversation so far: {}\nLatest message: {}",
            conversation_context, partner_message
        );
        let request = FlowRequest::new(input, "text")
            .tweak("response_style", "engaging")
            .tweak("length", "medium");

        match self.run_flow(flows::RESPONSE_GENERATOR, &request).await {
            Ok(response) if response.is_mock() => MOCK_SUGGESTION.to_string(),
            Ok(response) => non_empty_or(response.result.message, EMPTY_SUGGESTION),
            Err(e) => {
                error!(flow_id = flows::RESPONSE_GENERATOR, error = %e, "Response suggestion failed");
                FALLBACK_SUGGESTION.to_string()
            }
        }
    }

    /// Review a dating profile given as arbitrary JSON.
    pub async fn analyze_profile(&self, profile: &Value) -> ProfileAnalysis {
        let request =
            FlowRequest::new(profile.to_string(), "json").tweak("analysis_depth", "comprehensive");

        match self.run_flow(flows::PROFILE_ANALYSIS, &request).await {
            Ok(response) if response.is_mock() => ProfileAnalysis::mock(),
            Ok(response) => parse_or_fallback(
                &response.result.message,
                flows::PROFILE_ANALYSIS,
                ProfileAnalysis::fallback,
            ),
            Err(e) => {
                error!(flow_id = flows::PROFILE_ANALYSIS, error = %e, "Profile analysis failed");
                ProfileAnalysis::fallback()
            }
        }
    }
}

fn parse_or_fallback<T: serde::de::DeserializeOwned>(
    message: &str,
    flow_id: &str,
    fallback: fn() -> T,
) -> T {
    serde_json::from_str(message).unwrap_or_else(|e| {
        warn!(flow_id, error = %e, "Flow returned unparseable output");
        fallback()
    })
}

fn non_empty_or(message: String, default: &str) -> String {
    if message.trim().is_empty() {
        default.to_string()
    } else {
        message
    }
}
