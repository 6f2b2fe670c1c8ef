//! Configuration for the Langflow and Mistral clients.

use std::env;
use std::time::Duration;

/// Default request timeout for both providers.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retries after a transport error or 5xx.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Default Mistral API base URL.
pub const DEFAULT_MISTRAL_API_URL: &str = "https://api.mistral.ai";

/// Default Mistral model.
pub const DEFAULT_MISTRAL_MODEL: &str = "mistral-small-latest";

/// System prompt for the Aura coaching persona.
pub const AURA_SYSTEM_PROMPT: &str = "You are Aura, an AI-powered relationship and dating coach. \
Provide helpful, empathetic, and actionable dating advice. Keep responses concise and supportive. \
Focus on practical tips for building connections, improving conversations, and navigating relationships.";

/// First non-empty value among the given environment variables.
pub(crate) fn env_any(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

fn env_timeout(name: &str) -> Duration {
    let secs = env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Configuration for the Langflow workflow runner.
#[derive(Debug, Clone)]
pub struct LangflowConfig {
    /// Langflow base URL. `None` puts the client in mock mode.
    pub api_url: Option<String>,

    /// Bearer token. `None` puts the client in mock mode.
    pub api_key: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Retries after a transport error or 5xx.
    pub max_retries: u32,
}

impl Default for LangflowConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl LangflowConfig {
    /// Create configuration from environment variables.
    ///
    /// - `LANGFLOW_API_URL` or `LANGFLOW_ENDPOINT` - base URL
    /// - `LANGFLOW_API_KEY` or `LANGFLOW_TOKEN` - bearer token
    /// - `LANGFLOW_TIMEOUT_SECS` - request timeout (default: 30)
    ///
    /// Missing values leave the client in mock mode rather than failing.
    pub fn from_env() -> Self {
        Self {
            api_url: env_any(&["LANGFLOW_API_URL", "LANGFLOW_ENDPOINT"]),
            api_key: env_any(&["LANGFLOW_API_KEY", "LANGFLOW_TOKEN"]),
            timeout: env_timeout("LANGFLOW_TIMEOUT_SECS"),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Whether both URL and key are present.
    pub fn is_configured(&self) -> bool {
        self.api_url.is_some() && self.api_key.is_some()
    }

    /// Create a new config builder.
    pub fn builder() -> LangflowConfigBuilder {
        LangflowConfigBuilder::default()
    }
}

/// Builder for LangflowConfig.
#[derive(Debug, Default)]
pub struct LangflowConfigBuilder {
    config: LangflowConfig,
}

impl LangflowConfigBuilder {
    /// Set the base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = Some(url.into());
        self
    }

    /// Set the bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry budget.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> LangflowConfig {
        self.config
    }
}

/// Configuration for the Mistral chat client.
#[derive(Debug, Clone)]
pub struct MistralConfig {
    /// API base URL.
    pub api_url: String,

    /// API key. `None` makes advice fall back to a canned introduction.
    pub api_key: Option<String>,

    /// Model name to use.
    pub model: String,

    /// System prompt sent ahead of every conversation.
    pub system_prompt: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation.
    pub temperature: Option<f32>,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Retries after a transport error or 5xx.
    pub max_retries: u32,
}

impl Default for MistralConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_MISTRAL_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_MISTRAL_MODEL.to_string(),
            system_prompt: AURA_SYSTEM_PROMPT.to_string(),
            max_tokens: Some(500),
            temperature: Some(0.7),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl MistralConfig {
    /// Create configuration from environment variables.
    ///
    /// - `MISTRAL_API_KEY` - API key (unset means canned advice)
    /// - `MISTRAL_API_URL` - API URL (default: https://api.mistral.ai)
    /// - `MISTRAL_MODEL` - Model name (default: mistral-small-latest)
    /// - `MISTRAL_TIMEOUT_SECS` - request timeout (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_url: env_any(&["MISTRAL_API_URL"]).unwrap_or(defaults.api_url),
            api_key: env_any(&["MISTRAL_API_KEY"]),
            model: env_any(&["MISTRAL_MODEL"]).unwrap_or(defaults.model),
            timeout: env_timeout("MISTRAL_TIMEOUT_SECS"),
            ..defaults
        }
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Create a new config builder.
    pub fn builder() -> MistralConfigBuilder {
        MistralConfigBuilder::default()
    }
}

/// Builder for MistralConfig.
#[derive(Debug, Default)]
pub struct MistralConfigBuilder {
    config: MistralConfig,
}

impl MistralConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry budget.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> MistralConfig {
        self.config
    }
}
