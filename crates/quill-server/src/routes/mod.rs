//! Route definitions for the REST API.

mod analyze;
mod correct;
mod health;

use axum::{
    extract::multipart::MultipartRejection,
    extract::Multipart,
    routing::{get, post},
    Router,
};
use quill_extractors::ExtractedContent;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::upload::{self, StagedUpload};

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Document review
        .route("/analyze_file", post(analyze::analyze_file))
        .route("/correct_file", post(correct::correct_file))
        // Attach state
        .with_state(state)
}

/// Receive, classify, stage and extract an upload.
///
/// The staged file is returned alongside the text so it lives until the
/// handler finishes.
async fn extract_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StagedUpload, ExtractedContent)> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Request is not a usable multipart body");
        ApiError::no_file()
    })?;

    let document = upload::receive(&mut multipart).await?;
    let staged = StagedUpload::stage(document).await?;

    let content = state.pipeline().extract_file(staged.path(), staged.kind).await?;
    if let Some(reason) = content.extraction_error() {
        warn!(file = %staged.file_name, %reason, "Continuing with degraded extraction");
    }
    debug!(
        file = %staged.file_name,
        kind = %staged.kind,
        bytes = staged.size,
        chars = content.text.chars().count(),
        "Extracted upload"
    );

    Ok((staged, content))
}

pub use analyze::*;
pub use correct::*;
pub use health::*;
