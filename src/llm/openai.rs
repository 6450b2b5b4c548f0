//! OpenAI-compatible `/chat/completions` client.
//!
//! Any server that speaks the chat completions wire format works by pointing
//! `LLM_BASE_URL` at it. Parsing is a pure function for testability.

#[cfg(test)]
#[path = "openai_test.rs"]
mod openai_test;

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::config::LlmTimeouts;
use super::types::{ChatParams, ChatResponse, LlmError, Message};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
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
        let msgs = build_messages(system, messages);
        let body = CcRequest {
            model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            messages: &msgs,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
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

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: &'a [CcMessage<'a>],
}

#[derive(Serialize, Debug, PartialEq, Eq)]
struct CcMessage<'a> {
    role: &'a str,
    content: &'a str,
}

fn build_messages<'a>(system: &'a str, messages: &'a [Message]) -> Vec<CcMessage<'a>> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    if !system.trim().is_empty() {
        out.push(CcMessage { role: "system", content: system });
    }
    out.extend(messages.iter().map(|m| CcMessage { role: &m.role, content: &m.content }));
    out
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_response(json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let model = root
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();
    let usage = |key: &str| {
        root.get("usage")
            .and_then(|u| u.get(key))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_owned()));
    };
    let text = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let stop_reason = match choice.get("finish_reason").and_then(Value::as_str) {
        Some("length") => "max_tokens",
        _ => "end_turn",
    };

    Ok(ChatResponse {
        text,
        model,
        stop_reason: stop_reason.to_owned(),
        input_tokens: usage("prompt_tokens"),
        output_tokens: usage("completion_tokens"),
    })
}
