//! LLM: multi-provider adapter used to invent combined labels.
//!
//! DESIGN
//! ======
//! Configured from environment variables. The `LlmClient` enum dispatches to
//! `OpenAI` (the default) or Anthropic based on `LLM_PROVIDER`. Only plain-text
//! chat is needed here: one system prompt, one user message, one text reply.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmChat;
use types::{ChatParams, ChatResponse, LlmError, Message};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either `OpenAI` or Anthropic.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
    params: ChatParams,
}

enum LlmProvider {
    OpenAi(openai::OpenAiClient),
    Anthropic(anthropic::AnthropicClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables (see [`LlmConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = match config.provider {
            LlmProviderKind::OpenAi => {
                LlmProvider::OpenAi(openai::OpenAiClient::new(config.api_key, config.base_url, config.timeouts)?)
            }
            LlmProviderKind::Anthropic => LlmProvider::Anthropic(anthropic::AnthropicClient::new(
                config.api_key,
                config.base_url,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, model: config.model, params: config.params })
    }

    /// Return the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        match &self.inner {
            LlmProvider::OpenAi(c) => c.chat(&self.model, self.params, system, messages).await,
            LlmProvider::Anthropic(c) => c.chat(&self.model, self.params, system, messages).await,
        }
    }
}
