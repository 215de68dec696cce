//! DOCX to PDF conversion.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// Converts a DOCX on disk into a PDF.
#[async_trait]
pub trait PdfConverter: Send + Sync {
    /// Convert `docx` and write the PDF into `out_dir`.
    ///
    /// Returns the path of the produced PDF.
    async fn convert(&self, docx: &Path, out_dir: &Path) -> RenderResult<PathBuf>;

    /// Human-readable name for this converter.
    fn name(&self) -> &str;
}

/// Headless LibreOffice conversion (`soffice --convert-to pdf`).
#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    bin: PathBuf,
    timeout: Duration,
}

impl LibreOfficeConverter {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self {
            bin: bin.into(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Where soffice writes the PDF for `docx`.
    pub fn output_path(docx: &Path, out_dir: &Path) -> PathBuf {
        let stem = docx.file_stem().unwrap_or(docx.as_os_str());
        out_dir.join(format!("{}.pdf", stem.to_string_lossy()))
    }
}

impl Default for LibreOfficeConverter {
    fn default() -> Self {
        Self::new("soffice")
    }
}

#[async_trait]
impl PdfConverter for LibreOfficeConverter {
    async fn convert(&self, docx: &Path, out_dir: &Path) -> RenderResult<PathBuf> {
        let mut command = Command::new(&self.bin);
        command
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(docx)
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                RenderError::Conversion(format!(
                    "{} timed out after {:?}",
                    self.bin.display(),
                    self.timeout
                ))
            })?
            .map_err(|e| {
                RenderError::Conversion(format!("failed to run {}: {}", self.bin.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Conversion(format!(
                "{} exited with {}: {}",
                self.bin.display(),
                output.status,
                stderr.trim()
            )));
        }

        let pdf = Self::output_path(docx, out_dir);
        debug!(path = %pdf.display(), "LibreOffice conversion finished");
        Ok(pdf)
    }

    fn name(&self) -> &str {
        "libreoffice"
    }
}

/// Converter used when PDF output is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledConverter;

#[async_trait]
impl PdfConverter for DisabledConverter {
    async fn convert(&self, _docx: &Path, _out_dir: &Path) -> RenderResult<PathBuf> {
        Err(RenderError::ConversionDisabled)
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
