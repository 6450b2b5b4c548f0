//! LLM configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use super::types::{ChatParams, LlmError};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    OpenAi,
    Anthropic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub params: ChatParams,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Optional:
    /// - `LLM_PROVIDER`: `openai` (default) or `anthropic`
    /// - `LLM_API_KEY_ENV`: names the env var holding the key
    ///   (`OPENAI_API_KEY` / `ANTHROPIC_API_KEY` by provider)
    /// - `LLM_MODEL`: provider default when absent
    /// - `LLM_BASE_URL`: provider API base URL
    /// - `LLM_MAX_TOKENS`: default 256
    /// - `LLM_TEMPERATURE`: default 0
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unknown or the key variable is unset.
    pub fn from_env() -> Result<Self, LlmError> {
        let provider = match std::env::var("LLM_PROVIDER") {
            Ok(raw) => parse_provider(&raw)?,
            Err(_) => LlmProviderKind::OpenAi,
        };

        let key_var = std::env::var("LLM_API_KEY_ENV").unwrap_or_else(|_| default_key_var(provider).to_owned());
        let api_key = std::env::var(&key_var).map_err(|_| LlmError::MissingApiKey { var: key_var.clone() })?;

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| default_model(provider).to_owned());
        let base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| default_base_url(provider).to_owned())
            .trim_end_matches('/')
            .to_owned();
        let params = ChatParams {
            max_tokens: crate::config::env_parse("LLM_MAX_TOKENS", DEFAULT_LLM_MAX_TOKENS),
            temperature: crate::config::env_parse("LLM_TEMPERATURE", 0.0),
        };
        let timeouts = LlmTimeouts {
            request_secs: crate::config::env_parse("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: crate::config::env_parse("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { provider, api_key, model, base_url, params, timeouts })
    }
}

fn parse_provider(raw: &str) -> Result<LlmProviderKind, LlmError> {
    match raw.trim() {
        "openai" => Ok(LlmProviderKind::OpenAi),
        "anthropic" => Ok(LlmProviderKind::Anthropic),
        other => Err(LlmError::ConfigParse(format!("unknown LLM_PROVIDER: {other}"))),
    }
}

fn default_key_var(provider: LlmProviderKind) -> &'static str {
    match provider {
        LlmProviderKind::OpenAi => "OPENAI_API_KEY",
        LlmProviderKind::Anthropic => "ANTHROPIC_API_KEY",
    }
}

fn default_model(provider: LlmProviderKind) -> &'static str {
    match provider {
        LlmProviderKind::OpenAi => "gpt-4o-mini",
        LlmProviderKind::Anthropic => "claude-3-5-haiku-latest",
    }
}

fn default_base_url(provider: LlmProviderKind) -> &'static str {
    match provider {
        LlmProviderKind::OpenAi => DEFAULT_OPENAI_BASE_URL,
        LlmProviderKind::Anthropic => DEFAULT_ANTHROPIC_BASE_URL,
    }
}
