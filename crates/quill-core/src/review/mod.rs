//! Review adapters: grammar/compliance analysis and copy-editing of
//! extracted document text through the chat-completion capability.

mod analyzer;
mod corrector;
mod json_parser;
mod prompts;
mod text;

pub use analyzer::{Analyzer, ANALYSIS_CHAR_LIMIT};
pub use corrector::{Corrector, CORRECTION_CHAR_LIMIT};
pub use json_parser::{parse_analysis_reply, strip_code_fences};
pub use prompts::{
    analysis_prompt, correction_prompt, ANALYSIS_SYSTEM_PROMPT, CORRECTION_SYSTEM_PROMPT,
};
pub use text::truncate_chars;
