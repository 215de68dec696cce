//! Core types for content extraction.

use quill_core::DocumentKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata key set when extraction degraded to an error description.
pub const EXTRACTION_ERROR_KEY: &str = "extraction_error";

/// Document structure metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Total page count (for PDFs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,

    /// Per-page text (for PDFs).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub pages: Vec<String>,

    /// Header text per section (for DOCX).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub headers: Vec<String>,

    /// Footer text per section (for DOCX).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub footers: Vec<String>,
}

/// Extracted content with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Extracted plain text, in document order.
    pub text: String,

    /// Format the text came from.
    pub kind: DocumentKind,

    /// Document structure (if preserved).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<DocumentStructure>,

    /// Additional metadata (format-specific).
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExtractedContent {
    /// Create new extracted content.
    pub fn new(text: String, kind: DocumentKind) -> Self {
        Self {
            text,
            kind,
            structure: None,
            metadata: HashMap::new(),
        }
    }

    /// Add structure information.
    pub fn with_structure(mut self, structure: DocumentStructure) -> Self {
        self.structure = Some(structure);
        self
    }

    /// Add metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Error description if the text is a degraded placeholder.
    pub fn extraction_error(&self) -> Option<&str> {
        self.metadata
            .get(EXTRACTION_ERROR_KEY)
            .and_then(|v| v.as_str())
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get content length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }
}
