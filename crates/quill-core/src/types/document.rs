//! Uploaded document classification.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Media type of PDF documents.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Media type of Word (OOXML) documents.
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF document.
    Pdf,
    /// Microsoft Word document.
    Docx,
}

impl DocumentKind {
    /// Classify a file by its name suffix, ignoring case.
    ///
    /// Returns `None` for anything other than `.pdf` or `.docx`.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if lower.ends_with(".docx") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }

    /// Standard media type.
    pub fn media_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => PDF_MEDIA_TYPE,
            DocumentKind::Docx => DOCX_MEDIA_TYPE,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// A file received from a client, alive for a single request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// File name declared by the client.
    pub file_name: String,
    /// Raw file content.
    pub content: Vec<u8>,
}

impl UploadedDocument {
    /// Create a new uploaded document.
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    /// Classify the upload by its declared file name.
    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_file_name(&self.file_name)
    }

    /// File name without directory components or extension.
    pub fn stem(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("document")
            .to_string()
    }

    /// Size of the upload in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the upload is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
