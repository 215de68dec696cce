//! Corrected-document emission: DOCX always, PDF when conversion works.

use std::sync::Arc;

use quill_core::{DocumentKind, RenderConfig};
use tracing::{debug, info, warn};

use crate::converter::{DisabledConverter, LibreOfficeConverter, PdfConverter};
use crate::docx_writer::build_docx;
use crate::error::{RenderError, RenderResult};
use crate::types::CorrectedArtifact;

const STAGED_DOCX: &str = "corrected.docx";

/// Turns corrected text into exactly one downloadable document.
#[derive(Clone)]
pub struct DocumentEmitter {
    converter: Arc<dyn PdfConverter>,
}

impl DocumentEmitter {
    pub fn new(converter: Arc<dyn PdfConverter>) -> Self {
        Self { converter }
    }

    /// Emitter for the configured conversion setting.
    pub fn from_config(config: &RenderConfig) -> Self {
        let converter: Arc<dyn PdfConverter> = if config.pdf_conversion {
            Arc::new(LibreOfficeConverter::new(config.soffice_bin.clone()))
        } else {
            Arc::new(DisabledConverter)
        };
        Self::new(converter)
    }

    /// Name of the configured converter.
    pub fn converter_name(&self) -> &str {
        self.converter.name()
    }

    /// Write `text` to a DOCX and try to convert it to PDF.
    ///
    /// The PDF is returned if conversion produced a file; otherwise the DOCX.
    /// Conversion failures are logged and never returned. The scratch
    /// directory is removed before this returns.
    pub async fn emit(&self, text: &str, stem: &str) -> RenderResult<CorrectedArtifact> {
        let owned = text.to_string();
        let docx = tokio::task::spawn_blocking(move || build_docx(&owned)).await??;

        let scratch = tempfile::tempdir()?;
        let docx_path = scratch.path().join(STAGED_DOCX);
        tokio::fs::write(&docx_path, &docx).await?;

        match self.converter.convert(&docx_path, scratch.path()).await {
            Ok(pdf_path) => match tokio::fs::read(&pdf_path).await {
                Ok(pdf) => {
                    info!(bytes = pdf.len(), "Returning corrected PDF");
                    return Ok(CorrectedArtifact::new(DocumentKind::Pdf, stem, pdf));
                }
                Err(e) => warn!(
                    converter = self.converter.name(),
                    path = %pdf_path.display(),
                    error = %e,
                    "Converted PDF not readable, returning DOCX"
                ),
            },
            Err(RenderError::ConversionDisabled) => debug!("PDF conversion disabled"),
            Err(e) => warn!(
                converter = self.converter.name(),
                error = %e,
                "PDF conversion failed, returning DOCX"
            ),
        }

        info!(bytes = docx.len(), "Returning corrected DOCX");
        Ok(CorrectedArtifact::new(DocumentKind::Docx, stem, docx))
    }
}

impl std::fmt::Debug for DocumentEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentEmitter")
            .field("converter", &self.converter.name())
            .finish()
    }
}
