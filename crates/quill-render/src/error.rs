//! Render error types.

use thiserror::Error;

/// Errors that can occur while re-emitting a document.
#[derive(Error, Debug)]
pub enum RenderError {
    /// DOCX generation failed.
    #[error("DOCX generation error: {0}")]
    Docx(String),

    /// PDF conversion failed.
    #[error("PDF conversion failed: {0}")]
    Conversion(String),

    /// PDF conversion is switched off.
    #[error("PDF conversion is disabled")]
    ConversionDisabled,

    /// IO error while staging the artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Task join error from spawn_blocking.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
