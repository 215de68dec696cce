//! quill-render - Re-emission of corrected text as a downloadable document.
//!
//! The corrected text is always written to a DOCX. A [`PdfConverter`] then
//! gets one chance to turn it into a PDF; when it fails, the DOCX is what
//! the caller receives.
//!
//! # Example
//!
//! ```ignore
//! use quill_render::DocumentEmitter;
//!
//! let emitter = DocumentEmitter::from_config(&config.render);
//! let artifact = emitter.emit(&corrected_text, "q3 report").await?;
//! assert_eq!(artifact.file_name, "q3 report_corrected.pdf");
//! ```

mod converter;
mod docx_writer;
mod emitter;
mod error;
mod types;

pub use converter::{DisabledConverter, LibreOfficeConverter, PdfConverter};
pub use docx_writer::{build_docx, CORRECTED_HEADING, HEADING_STYLE_ID};
pub use emitter::DocumentEmitter;
pub use error::{RenderError, RenderResult};
pub use types::CorrectedArtifact;
