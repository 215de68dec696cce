//! PDF content extraction using pdf-extract.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentStructure, ExtractedContent, EXTRACTION_ERROR_KEY};
use crate::Extractor;
use async_trait::async_trait;
use quill_core::DocumentKind;
use tracing::{debug, warn};

/// PDF content extractor using pdf-extract library.
///
/// Extracts text page by page, wrapping synchronous pdf-extract calls in
/// spawn_blocking to avoid blocking the async runtime. A document that
/// cannot be read yields its error description as text instead of failing.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create new PDF extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract per-page text synchronously (called within spawn_blocking).
    pub fn extract_pages(content: &[u8]) -> ExtractResult<Vec<String>> {
        pdf_extract::extract_text_from_mem_by_pages(content)
            .map_err(|e| ExtractError::Pdf(e.to_string()))
    }

    /// Concatenate page texts and trim the result.
    pub fn join_pages(pages: &[String]) -> String {
        pages.concat().trim().to_string()
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();

        // A panic inside the parser surfaces as a JoinError and degrades the
        // same way as a parse error.
        let pages = tokio::task::spawn_blocking(move || Self::extract_pages(&content))
            .await
            .map_err(ExtractError::from)
            .and_then(|r| r);

        match pages {
            Ok(pages) => {
                let text = Self::join_pages(&pages);
                debug!(pages = pages.len(), chars = text.len(), "Extracted PDF text");

                let structure = DocumentStructure {
                    page_count: Some(pages.len()),
                    pages,
                    ..Default::default()
                };
                Ok(ExtractedContent::new(text, DocumentKind::Pdf)
                    .with_structure(structure)
                    .with_metadata("original_size", content_len))
            }
            Err(e) => {
                warn!(error = %e, "PDF extraction failed, passing error text downstream");
                Ok(
                    ExtractedContent::new(format!("Error extracting text: {}", e), DocumentKind::Pdf)
                        .with_metadata(EXTRACTION_ERROR_KEY, e.to_string())
                        .with_metadata("original_size", content_len),
                )
            }
        }
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}
