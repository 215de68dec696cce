//! quill-llm - Chat-completion provider implementations for quill.
//!
//! # Supported Providers
//!
//! - **OpenAI** (feature: `openai`, default) - any chat model, `gpt-4o-mini` by default.
//!   `OPENAI_BASE_URL` points the client at an OpenAI-compatible gateway.
//!
//! # Example
//!
//! ```ignore
//! use quill_llm::LlmFactory;
//!
//! let llm = LlmFactory::create(config.llm)?;
//! let analyzer = quill_core::Analyzer::new(llm);
//! ```

mod factory;
mod openai;

pub use factory::LlmFactory;
pub use openai::OpenAIProvider;

// Re-export core types for convenience
pub use quill_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse};
