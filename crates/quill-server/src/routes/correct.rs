//! Document correction endpoint.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use quill_render::CorrectedArtifact;
use tracing::info;

use super::extract_upload;
use crate::error::ApiResult;
use crate::state::AppState;

/// A corrected document sent back as an attachment.
#[derive(Debug)]
pub struct FileDownload(pub CorrectedArtifact);

impl IntoResponse for FileDownload {
    fn into_response(self) -> Response {
        let artifact = self.0;
        let disposition = content_disposition(&artifact.file_name);
        (
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(artifact.media_type())),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            artifact.bytes,
        )
            .into_response()
    }
}

/// `attachment; filename="..."` with characters a header cannot carry
/// replaced by `_`.
fn content_disposition(file_name: &str) -> HeaderValue {
    let safe: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", safe))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Rewrite an uploaded document and return it as DOCX or PDF.
/// POST /correct_file
pub async fn correct_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<FileDownload> {
    let (staged, content) = extract_upload(&state, multipart).await?;

    let corrected = state.corrector().correct(&content.text).await?;
    let artifact = state.emitter().emit(&corrected, &staged.stem).await?;
    info!(
        file = %staged.file_name,
        artifact = %artifact.file_name,
        bytes = artifact.len(),
        "Correction complete"
    );

    Ok(FileDownload(artifact))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            content_disposition("memo_corrected.docx"),
            "attachment; filename=\"memo_corrected.docx\""
        );
        assert_eq!(
            content_disposition("r\u{e9}sum\u{e9} \"v2\"_corrected.pdf"),
            "attachment; filename=\"r_sum_ _v2__corrected.pdf\""
        );
    }
}
