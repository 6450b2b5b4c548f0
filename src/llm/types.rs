//! LLM types: provider-neutral messages, responses, and errors.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

/// A single plain-text message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_owned(), content: content.into() }
    }
}

/// Response from an LLM chat call, reduced to its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Concatenated text of every text block in the reply.
    pub text: String,
    pub model: String,
    pub stop_reason: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Sampling settings shared by every request a client sends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

// =============================================================================
// LLM CHAT TRAIT
// =============================================================================

/// Provider-neutral async trait for LLM chat. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// Send a chat request to the LLM provider.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is malformed.
    async fn chat(&self, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError>;
}
