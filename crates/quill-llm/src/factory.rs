//! Factory for creating LLM providers.

use std::sync::Arc;

use quill_core::error::QuillResult;
use quill_core::traits::{Llm, LlmConfig};

use crate::openai::OpenAIProvider;

/// Factory for creating LLM providers.
pub struct LlmFactory;

impl LlmFactory {
    /// Create the chat-completion provider from the given configuration.
    pub fn create(config: LlmConfig) -> QuillResult<Arc<dyn Llm>> {
        let llm = OpenAIProvider::new(config)?;
        Ok(Arc::new(llm))
    }
}
