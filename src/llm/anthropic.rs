//! Anthropic Messages API client.
//!
//! Thin HTTP wrapper for `/v1/messages`. Pure parsing in `parse_response` for testability.

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod anthropic_test;

use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{ChatParams, ChatResponse, LlmError, Message};

const API_VERSION: &str = "2023-06-01";

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    /// # Errors
    ///
    /// Returns an [`LlmError`] on transport failure, non-200 status, or an unparseable body.
    pub async fn chat(
        &self,
        model: &str,
        params: ChatParams,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let body = ApiRequest {
            model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            system,
            messages,
        };

        let response = self
            .http
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: &'a [Message],
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    content: Vec<ApiBlock>,
    model: String,
    stop_reason: Option<String>,
    usage: Usage,
}

#[derive(serde::Deserialize)]
#[serde(tag = "type")]
enum ApiBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(serde::Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<ChatResponse, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let text = api
        .content
        .into_iter()
        .filter_map(|block| match block {
            ApiBlock::Text { text } => Some(text),
            ApiBlock::Other => None,
        })
        .collect::<String>();

    Ok(ChatResponse {
        text,
        model: api.model,
        stop_reason: api.stop_reason.unwrap_or_else(|| "end_turn".to_owned()),
        input_tokens: api.usage.input_tokens,
        output_tokens: api.usage.output_tokens,
    })
}
