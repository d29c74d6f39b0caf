//! LLM client for document comparison.
//!
//! Talks to OpenAI-compatible chat completion APIs.

mod config;
pub mod prompts;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use config::LlmConfig;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// What the caller asks of one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    /// Ask the service for a JSON object response.
    pub json_mode: bool,
}

/// A hosted completion service.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Whether the service can be called at all (credentials present).
    fn is_configured(&self) -> bool;

    /// Run one completion and return the text of the first choice, if any.
    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, LlmError>;
}

/// OpenAI-compatible chat completion client.
pub struct OpenAiClient {
    config: LlmConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    error: Option<ApiErrorPayload>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    message: String,
}

impl OpenAiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LlmError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl CompletionApi for OpenAiClient {
    fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, LlmError> {
        let api_key = self.config.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.temperature,
            response_format: request.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let url = self.config.completions_url();
        debug!("Requesting completion from {} ({})", url, self.config.model);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
        }

        let chat: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        if let Some(error) = chat.error {
            return Err(LlmError::Api(error.message));
        }

        Ok(chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }
}

/// Errors that can occur during completion calls.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Failed to connect to the service
    #[error("Connection error: {0}")]
    Connection(String),
    /// Service returned an error
    #[error("API error: {0}")]
    Api(String),
    /// Failed to parse the service response envelope
    #[error("Parse error: {0}")]
    Parse(String),
    /// No credential configured
    #[error("API key is not configured")]
    MissingApiKey,
}
