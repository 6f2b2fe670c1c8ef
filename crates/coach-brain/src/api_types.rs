//! Provider request and response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a Langflow run request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlowRequest {
    /// Text fed to the flow's input node.
    pub input_value: String,
    /// Expected output kind: "chat", "text" or "json".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Per-run component overrides.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub tweaks: Map<String, Value>,
}

impl FlowRequest {
    /// A request with the given input and output type.
    pub fn new(input_value: impl Into<String>, output_type: &str) -> Self {
        Self {
            input_value: input_value.into(),
            output_type: Some(output_type.to_string()),
            ..Default::default()
        }
    }

    /// Add a string tweak.
    pub fn tweak(mut self, key: &str, value: &str) -> Self {
        self.tweaks
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }
}

/// Langflow run response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowResponse {
    #[serde(default)]
    pub result: FlowResult,
    #[serde(default)]
    pub session_id: String,
}

/// Result payload of a flow run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowResult {
    /// Primary text output; may hold JSON for analysis flows.
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub result_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl FlowResponse {
    /// Whether this response was synthesized locally.
    pub fn is_mock(&self) -> bool {
        self.result
            .data
            .as_ref()
            .and_then(|d| d.get("mock"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Chat completion response. Only the fields we read are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// Response message.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl ApiErrorBody {
    /// Best human-readable message in the body.
    pub fn text(&self) -> Option<String> {
        if let Some(ref message) = self.message {
            return Some(message.clone());
        }
        match self.error.as_ref()? {
            Value::String(s) => Some(s.clone()),
            other => other
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}
