//! Document analysis endpoint.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use quill_core::AnalysisResult;
use tracing::info;

use super::extract_upload;
use crate::error::ApiResult;
use crate::state::AppState;

/// Grade grammar, tone and compliance of an uploaded document.
/// POST /analyze_file
pub async fn analyze_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<AnalysisResult>> {
    let (staged, content) = extract_upload(&state, multipart).await?;

    let result = state.analyzer().analyze(&content.text).await?;
    info!(
        file = %staged.file_name,
        grammar_score = %result.grammar_score,
        fallback = result.is_parse_failure(),
        "Analysis complete"
    );

    Ok(Json(result))
}
