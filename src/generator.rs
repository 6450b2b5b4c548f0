//! Generator interface: turns a pair of labels into a new label.
//!
//! The engine treats generation as an opaque, possibly slow, possibly failing
//! call. It is invoked at most once per accepted collision, off the update
//! loop, with no retry at this layer. [`LlmGenerator`] is the production
//! implementation; tests substitute their own.

#[cfg(test)]
#[path = "generator_test.rs"]
mod generator_test;

use std::sync::Arc;

use tracing::debug;

use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};

const SYSTEM_PROMPT: &str = "\
You combine two words or phrases into a single new one, in the style of classic \
alchemy crafting games (Fire + Water = Steam, Earth + Water = Mud). Any object, \
creature, place, or concept may result. Reply with ONLY the resulting word or \
short phrase, optionally prefixed by one or two relevant emoji. No explanation, \
no punctuation around it.";

/// Errors produced by a generation request.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The generator answered with nothing usable (empty or whitespace only).
    #[error("generator returned an empty label")]
    Empty,

    /// The LLM call failed.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The task running the request panicked or was cancelled.
    #[error("generation task failed: {0}")]
    Task(String),
}

/// Maps an ordered pair of labels to a new label.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    /// Produce the label for `first + second`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] if the underlying service fails or has
    /// nothing to offer.
    async fn generate(&self, first: &str, second: &str) -> Result<String, GenerationError>;
}

/// Generator backed by an LLM chat endpoint.
pub struct LlmGenerator {
    chat: Arc<dyn LlmChat>,
}

impl LlmGenerator {
    #[must_use]
    pub fn new(chat: Arc<dyn LlmChat>) -> Self {
        Self { chat }
    }
}

#[async_trait::async_trait]
impl Generator for LlmGenerator {
    async fn generate(&self, first: &str, second: &str) -> Result<String, GenerationError> {
        let messages = [Message::user(format!("{first} + {second}"))];
        let response = self.chat.chat(SYSTEM_PROMPT, &messages).await?;
        debug!(
            first,
            second,
            reply = %response.text,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "generator reply"
        );
        clean_label(&response.text).ok_or(GenerationError::Empty)
    }
}

/// Reduce a model reply to a single label: first non-blank line, surrounding quotes
/// and trailing full stops removed. `None` when nothing is left.
#[must_use]
pub fn clean_label(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let label = line
        .trim_end_matches('.')
        .trim_matches(|c| matches!(c, '"' | '\'' | '`' | '*'))
        .trim_end_matches('.')
        .trim();
    (!label.is_empty()).then(|| label.to_owned())
}
