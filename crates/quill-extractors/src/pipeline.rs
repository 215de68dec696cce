//! Extraction pipeline for processing uploads through the matching extractor.

use std::path::Path;
use std::sync::Arc;

use quill_core::DocumentKind;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::types::ExtractedContent;
use crate::Extractor;

/// Pipeline for extracting content using registered extractors.
///
/// Routes content to the first extractor that supports its document kind.
#[derive(Clone)]
pub struct ExtractionPipeline {
    extractors: Vec<Arc<dyn Extractor>>,
}

impl ExtractionPipeline {
    /// Create new empty pipeline.
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Create pipeline with all available extractors.
    pub fn with_defaults() -> Self {
        Self {
            extractors: crate::ExtractorFactory::all(),
        }
    }

    /// Add an extractor to the pipeline.
    pub fn add_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Extract content using the appropriate extractor for the kind.
    pub async fn extract(
        &self,
        content: &[u8],
        kind: DocumentKind,
    ) -> ExtractResult<ExtractedContent> {
        for extractor in &self.extractors {
            if extractor.supports(kind) {
                debug!(extractor = extractor.name(), %kind, bytes = content.len(), "Extracting");
                return extractor.extract(content).await;
            }
        }

        Err(ExtractError::UnsupportedType(kind.to_string()))
    }

    /// Read a staged file and extract its content.
    pub async fn extract_file(
        &self,
        path: &Path,
        kind: DocumentKind,
    ) -> ExtractResult<ExtractedContent> {
        if !self.supports(kind) {
            return Err(ExtractError::UnsupportedType(kind.to_string()));
        }
        let content = tokio::fs::read(path).await?;
        self.extract(&content, kind).await
    }

    /// Check if pipeline can handle a given document kind.
    pub fn supports(&self, kind: DocumentKind) -> bool {
        self.extractors.iter().any(|e| e.supports(kind))
    }

    /// Get the number of registered extractors.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Check if the pipeline has no registered extractors.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}
