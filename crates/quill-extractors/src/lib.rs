//! quill-extractors - Plain-text extraction from uploaded documents.
//!
//! Provides extractors for PDF and DOCX content behind a single trait, and a
//! pipeline that routes an upload to the extractor for its kind.
//!
//! # Features
//!
//! - `pdf` (default) - PDF text extraction via pdf-extract
//! - `docx` (default) - DOCX text extraction via docx-rs, with section
//!   headers and footers read from the package parts
//!
//! # Example
//!
//! ```ignore
//! use quill_core::DocumentKind;
//! use quill_extractors::{ExtractionPipeline, ExtractorFactory};
//!
//! // Use pipeline for routing by document kind
//! let pipeline = ExtractionPipeline::with_defaults();
//! let result = pipeline.extract(&pdf_bytes, DocumentKind::Pdf).await?;
//!
//! // Or a single extractor
//! let docx = ExtractorFactory::docx();
//! let result = docx.extract(&docx_bytes).await?;
//! ```

mod error;
mod factory;
mod pipeline;
mod types;

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "docx")]
mod docx;

pub use error::{ExtractError, ExtractResult};
pub use factory::ExtractorFactory;
pub use pipeline::ExtractionPipeline;
pub use types::{DocumentStructure, ExtractedContent, EXTRACTION_ERROR_KEY};

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

#[cfg(feature = "docx")]
pub use docx::{DocxExtractor, SectionText, FOOTER_TAG, HEADER_TAG};

use async_trait::async_trait;
use quill_core::DocumentKind;

/// Core Extractor trait - all document extractors implement this.
///
/// Same shape as the `Llm` trait in quill-core.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract text content from bytes.
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent>;

    /// Document kind this extractor reads.
    fn kind(&self) -> DocumentKind;

    /// Check if this extractor handles the given document kind.
    fn supports(&self, kind: DocumentKind) -> bool {
        self.kind() == kind
    }

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
