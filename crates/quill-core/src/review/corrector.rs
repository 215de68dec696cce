//! Copy-editing of document text.

use std::sync::Arc;

use tracing::debug;

use super::prompts::{correction_prompt, CORRECTION_SYSTEM_PROMPT};
use super::text::truncate_chars;
use crate::error::{QuillError, QuillResult};
use crate::traits::{GenerationOptions, Llm, DEFAULT_TEMPERATURE};
use crate::types::Message;

/// Characters of extracted text sent to the model for correction.
pub const CORRECTION_CHAR_LIMIT: usize = 7000;

/// Correction adapter.
///
/// The reply is trimmed and returned as-is; nothing checks that the model
/// actually produced corrected text.
#[derive(Clone)]
pub struct Corrector {
    llm: Arc<dyn Llm>,
}

impl Corrector {
    /// Create a new corrector on top of a chat-completion provider.
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    /// Rewrite extracted document text.
    pub async fn correct(&self, text: &str) -> QuillResult<String> {
        let excerpt = truncate_chars(text, CORRECTION_CHAR_LIMIT);
        debug!(chars = excerpt.chars().count(), "Requesting document correction");

        let messages = [
            Message::system(CORRECTION_SYSTEM_PROMPT),
            Message::user(correction_prompt(excerpt)),
        ];
        let response = self
            .llm
            .generate(
                &messages,
                Some(GenerationOptions::with_temperature(DEFAULT_TEMPERATURE)),
            )
            .await?;

        let content = response
            .content
            .ok_or_else(|| QuillError::empty_completion(&self.llm.model_name()))?;
        Ok(content.trim().to_string())
    }
}
