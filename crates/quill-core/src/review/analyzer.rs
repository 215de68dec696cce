//! Grammar, tone and compliance analysis of document text.

use std::sync::Arc;

use tracing::{debug, warn};

use super::json_parser::parse_analysis_reply;
use super::prompts::{analysis_prompt, ANALYSIS_SYSTEM_PROMPT};
use super::text::truncate_chars;
use crate::error::QuillResult;
use crate::traits::{GenerationOptions, Llm, DEFAULT_TEMPERATURE};
use crate::types::{AnalysisResult, Message, PARSE_ERROR_SUMMARY};

/// Characters of extracted text sent to the model for analysis.
pub const ANALYSIS_CHAR_LIMIT: usize = 5000;

/// Analysis adapter.
///
/// Sends at most [`ANALYSIS_CHAR_LIMIT`] characters to the model and always
/// hands back a five-field [`AnalysisResult`]: an unusable reply becomes the
/// sentinel result. Transport errors from the model are returned as errors.
#[derive(Clone)]
pub struct Analyzer {
    llm: Arc<dyn Llm>,
    fallback_summary: String,
}

impl Analyzer {
    /// Create a new analyzer on top of a chat-completion provider.
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self {
            llm,
            fallback_summary: PARSE_ERROR_SUMMARY.to_string(),
        }
    }

    /// Override the summary carried by the sentinel result.
    pub fn with_fallback_summary(mut self, summary: impl Into<String>) -> Self {
        self.fallback_summary = summary.into();
        self
    }

    /// Summary carried by the sentinel result.
    pub fn fallback_summary(&self) -> &str {
        &self.fallback_summary
    }

    /// Analyze extracted document text.
    pub async fn analyze(&self, text: &str) -> QuillResult<AnalysisResult> {
        let excerpt = truncate_chars(text, ANALYSIS_CHAR_LIMIT);
        debug!(
            chars = excerpt.chars().count(),
            truncated = excerpt.len() < text.len(),
            "Requesting document analysis"
        );

        let messages = [
            Message::system(ANALYSIS_SYSTEM_PROMPT),
            Message::user(analysis_prompt(excerpt)),
        ];
        let response = self
            .llm
            .generate(
                &messages,
                Some(GenerationOptions::with_temperature(DEFAULT_TEMPERATURE)),
            )
            .await?;

        match parse_analysis_reply(response.content_or_empty()) {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!(error = %e, "Model reply is not a valid analysis, using fallback result");
                Ok(AnalysisResult::parse_failure(self.fallback_summary.clone()))
            }
        }
    }
}
