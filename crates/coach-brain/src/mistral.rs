//! Mistral chat client for Aura's dating advice.

use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::analysis::{EMPTY_ADVICE, FAILED_ADVICE, UNCONFIGURED_ADVICE};
use crate::api_types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::MistralConfig;
use crate::error::BrainError;
use crate::http;

/// One prior turn of a conversation with Aura.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTurn {
    /// Written by the user (otherwise by the assistant).
    pub from_user: bool,
    pub content: String,
}

impl HistoryTurn {
    pub fn new(from_user: bool, content: impl Into<String>) -> Self {
        Self {
            from_user,
            content: content.into(),
        }
    }

    fn to_message(&self) -> ChatMessage {
        if self.from_user {
            ChatMessage::user(self.content.clone())
        } else {
            ChatMessage::assistant(self.content.clone())
        }
    }
}

/// Chat-completion client for the Mistral API.
#[derive(Debug, Clone)]
pub struct MistralClient {
    client: Client,
    config: MistralConfig,
}

impl MistralClient {
    /// Create a client with the given configuration.
    pub fn new(config: MistralConfig) -> Result<Self, BrainError> {
        let client = http::build_client(config.timeout)?;

        if config.is_configured() {
            info!(model = %config.model, "Mistral client configured");
        } else {
            warn!("Mistral API key not configured, advice will be canned");
        }

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(MistralConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &MistralConfig {
        &self.config
    }

    /// Whether an API key is configured.
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Send a chat completion with the system prompt prepended.
    ///
    /// Returns `Ok(None)` when the model answers with no usable content.
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<Option<String>, BrainError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| BrainError::Configuration("MISTRAL_API_KEY not set".to_string()))?;

        let url = format!(
            "{}/v1/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );

        let mut all = Vec::with_capacity(messages.len() + 1);
        all.push(ChatMessage::system(self.config.system_prompt.clone()));
        all.extend(messages);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: all,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(model = %request.model, turns = request.messages.len(), "Sending chat request");

        let response =
            http::post_json(&self.client, &url, key, &request, self.config.max_retries).await?;

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to parse response: {}", e)))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty()))
    }

    /// Dating advice for `message`, given earlier turns.
    ///
    /// Never fails: an unconfigured client, a provider error and an empty
    /// answer each map to their own canned reply.
    pub async fn generate_dating_advice(&self, message: &str, history: &[HistoryTurn]) -> String {
        if !self.is_configured() {
            return UNCONFIGURED_ADVICE.to_string();
        }

        let mut messages: Vec<ChatMessage> = history.iter().map(HistoryTurn::to_message).collect();
        messages.push(ChatMessage::user(message));

        match self.chat(messages).await {
            Ok(Some(advice)) => advice,
            Ok(None) => EMPTY_ADVICE.to_string(),
            Err(e) => {
                error!(error = %e, "Mistral call failed");
                FAILED_ADVICE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_advice() {
        let client = MistralClient::new(MistralConfig::default()).unwrap();
        assert!(!client.is_configured());

        let advice = client.generate_dating_advice("How do I ask her out?", &[]).await;
        assert_eq!(advice, UNCONFIGURED_ADVICE);

        let err = client.chat(vec![ChatMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, BrainError::Configuration(_)));
    }

    #[test]
    fn test_history_roles() {
        let turns = [HistoryTurn::new(true, "hi"), HistoryTurn::new(false, "hello!")];
        let roles: Vec<String> = turns.iter().map(|t| t.to_message().role).collect();
        assert_eq!(roles, vec!["user", "assistant"]);
    }
}
