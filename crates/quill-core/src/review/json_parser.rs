//! JSON parsing utilities for LLM responses.

use crate::error::{ErrorCode, QuillError, QuillResult};
use crate::types::AnalysisResult;

/// Trim the reply and drop every literal Markdown code-fence marker.
pub fn strip_code_fences(reply: &str) -> String {
    reply.trim().replace("```json", "").replace("```", "")
}

/// Parse a raw analysis reply into an [`AnalysisResult`].
///
/// Fails on anything that is not a JSON object with all five fields,
/// including an empty reply. Callers decide what to substitute.
pub fn parse_analysis_reply(reply: &str) -> QuillResult<AnalysisResult> {
    let cleaned = strip_code_fences(reply);
    serde_json::from_str(&cleaned).map_err(|e| QuillError::Parse {
        message: format!("Failed to parse analysis JSON: {}", e),
        code: if e.is_data() {
            ErrorCode::ParseMissingField
        } else {
            ErrorCode::ParseInvalidJson
        },
    })
}
