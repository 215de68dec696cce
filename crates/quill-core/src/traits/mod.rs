//! Core traits for quill providers.

mod llm;

pub use llm::*;
