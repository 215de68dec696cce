//! DOCX content extraction using docx-rs.
//!
//! Body paragraphs come first, then table cells, then the header and footer
//! of every section. Headers and footers are read by [`sections`] from the
//! package parts; any failure there drops them and keeps the rest.

mod sections;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentStructure, ExtractedContent};
use crate::Extractor;
use async_trait::async_trait;
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableChild, TableRowChild};
use quill_core::DocumentKind;
use tracing::debug;

pub use sections::SectionText;

/// Tag placed before each section header line.
pub const HEADER_TAG: &str = "HEADER: ";

/// Tag placed before each section footer line.
pub const FOOTER_TAG: &str = "FOOTER: ";

/// DOCX content extractor using docx-rs library.
///
/// Wraps synchronous docx-rs calls in spawn_blocking to avoid blocking the
/// async runtime. A package that docx-rs cannot open is an error.
#[derive(Debug, Clone)]
pub struct DocxExtractor {
    /// Whether to append section headers and footers.
    include_headers: bool,
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxExtractor {
    /// Create new DOCX extractor with default settings.
    pub fn new() -> Self {
        Self {
            include_headers: true,
        }
    }

    /// Configure whether section headers and footers are appended.
    pub fn with_headers(mut self, include: bool) -> Self {
        self.include_headers = include;
        self
    }

    /// Extract text synchronously (called within spawn_blocking).
    fn extract_sync(
        content: &[u8],
        include_headers: bool,
    ) -> ExtractResult<(String, DocumentStructure)> {
        let docx = docx_rs::read_docx(content)
            .map_err(|e| ExtractError::Docx(format!("Failed to parse DOCX: {}", e)))?;

        let mut text_parts: Vec<String> = Vec::new();
        let mut cell_parts: Vec<String> = Vec::new();

        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    let para_text = Self::extract_paragraph_text(p);
                    if !para_text.trim().is_empty() {
                        text_parts.push(para_text);
                    }
                }
                DocumentChild::Table(t) => Self::collect_cell_text(t, &mut cell_parts),
                _ => {
                    // Skip other document children (bookmarks, etc.)
                }
            }
        }

        // Tables after all body paragraphs, regardless of where they sit.
        text_parts.extend(cell_parts);

        let mut structure = DocumentStructure::default();
        if include_headers {
            match sections::read_sections(content) {
                Ok(sections) => {
                    for section in sections {
                        if let Some(header) = section.header {
                            text_parts.push(format!("{}{}", HEADER_TAG, header));
                            structure.headers.push(header);
                        }
                        if let Some(footer) = section.footer {
                            text_parts.push(format!("{}{}", FOOTER_TAG, footer));
                            structure.footers.push(footer);
                        }
                    }
                }
                Err(e) => debug!(error = %e, "Skipping DOCX headers and footers"),
            }
        }

        Ok((text_parts.join("\n"), structure))
    }

    /// Extract text from a paragraph.
    fn extract_paragraph_text(p: &docx_rs::Paragraph) -> String {
        let mut text = String::new();

        for child in &p.children {
            match child {
                ParagraphChild::Run(r) => {
                    for run_child in &r.children {
                        match run_child {
                            RunChild::Text(t) => {
                                text.push_str(&t.text);
                            }
                            RunChild::Tab(_) => {
                                text.push('\t');
                            }
                            RunChild::Break(_) => {
                                text.push('\n');
                            }
                            _ => {}
                        }
                    }
                }
                ParagraphChild::Hyperlink(h) => {
                    for child in &h.children {
                        if let ParagraphChild::Run(r) = child {
                            for run_child in &r.children {
                                if let RunChild::Text(t) = run_child {
                                    text.push_str(&t.text);
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        text
    }

    /// Push the text of every non-blank cell, row-major.
    fn collect_cell_text(t: &docx_rs::Table, out: &mut Vec<String>) {
        for row in &t.rows {
            let TableChild::TableRow(r) = row;
            for cell in &r.cells {
                let TableRowChild::TableCell(c) = cell;
                let paragraphs: Vec<String> = c
                    .children
                    .iter()
                    .filter_map(|child| match child {
                        docx_rs::TableCellContent::Paragraph(p) => {
                            Some(Self::extract_paragraph_text(p))
                        }
                        _ => None,
                    })
                    .collect();
                let cell_text = paragraphs.join("\n");
                if !cell_text.trim().is_empty() {
                    out.push(cell_text);
                }
            }
        }
    }
}

#[async_trait]
impl Extractor for DocxExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();
        let include_headers = self.include_headers;

        // Run synchronous DOCX extraction in blocking task
        let (text, structure) = tokio::task::spawn_blocking(move || {
            Self::extract_sync(&content, include_headers)
        })
        .await??;

        debug!(
            chars = text.len(),
            headers = structure.headers.len(),
            footers = structure.footers.len(),
            "Extracted DOCX text"
        );

        Ok(ExtractedContent::new(text, DocumentKind::Docx)
            .with_structure(structure)
            .with_metadata("original_size", content_len))
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Docx
    }

    fn name(&self) -> &str {
        "docx-rs"
    }
}
