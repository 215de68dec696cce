//! quill-core - Core library for quill.
//!
//! This crate provides the core types, the `Llm` trait, service
//! configuration, and the review adapters that turn extracted document text
//! into an analysis or a corrected rewrite.
//!
//! # Example
//!
//! ```ignore
//! use quill_core::{Analyzer, Corrector};
//!
//! let analyzer = Analyzer::new(llm.clone());
//! let result = analyzer.analyze(&text).await?;
//! println!("grammar: {}/100", result.grammar_score);
//!
//! let corrector = Corrector::new(llm);
//! let rewritten = corrector.correct(&text).await?;
//! ```

pub mod config;
pub mod error;
pub mod review;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{RenderConfig, ServerConfig, ServiceConfig};
pub use error::{ErrorCode, QuillError, QuillResult};
pub use review::{Analyzer, Corrector, ANALYSIS_CHAR_LIMIT, CORRECTION_CHAR_LIMIT};
pub use traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, TokenUsage};
pub use types::{
    AnalysisResult, DocumentKind, Message, MessageRole, Sentiment, UploadedDocument,
    DOCX_MEDIA_TYPE, PDF_MEDIA_TYPE,
};
