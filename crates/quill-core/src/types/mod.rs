//! Core types for quill.

mod analysis;
mod document;
mod message;

pub use analysis::*;
pub use document::*;
pub use message::*;
