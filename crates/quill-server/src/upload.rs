//! Multipart upload intake and temporary staging.

use std::io::Write;
use std::path::Path;

use axum::extract::Multipart;
use quill_core::{DocumentKind, UploadedDocument};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// Multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

/// Read the uploaded document out of a multipart body.
///
/// Takes the field named `file`; when there is none, the first field that
/// carries a file name.
pub async fn receive(multipart: &mut Multipart) -> ApiResult<UploadedDocument> {
    let mut fallback: Option<UploadedDocument> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let is_file_field = name.as_deref() == Some(FILE_FIELD);

        if !is_file_field && (file_name.is_none() || fallback.is_some()) {
            continue;
        }

        let content = field.bytes().await?.to_vec();
        let document = UploadedDocument::new(file_name.unwrap_or_default(), content);
        if is_file_field {
            return Ok(document);
        }
        fallback = Some(document);
    }

    fallback.ok_or_else(ApiError::no_file)
}

/// An upload written to a temporary file, deleted on drop.
#[derive(Debug)]
pub struct StagedUpload {
    pub kind: DocumentKind,
    pub file_name: String,
    pub stem: String,
    pub size: usize,
    file: NamedTempFile,
}

impl StagedUpload {
    /// Classify `document` and write it to a temporary file.
    ///
    /// Unsupported file names are rejected before anything touches disk.
    pub async fn stage(document: UploadedDocument) -> ApiResult<Self> {
        let kind = document.kind().ok_or_else(ApiError::unsupported_file_type)?;
        let stem = document.stem();
        let size = document.len();
        let UploadedDocument { file_name, content } = document;

        let file = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
            let mut file = tempfile::Builder::new()
                .prefix("quill-upload-")
                .suffix(&format!(".{}", kind.extension()))
                .tempfile()?;
            file.write_all(&content)?;
            file.flush()?;
            Ok(file)
        })
        .await??;

        debug!(%kind, size, path = %file.path().display(), "Staged upload");

        Ok(Self {
            kind,
            file_name,
            stem,
            size,
            file,
        })
    }

    /// Location of the staged bytes.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_stage_and_cleanup() {
        let staged = StagedUpload::stage(UploadedDocument::new("Report.PDF", b"%PDF-1.4".to_vec()))
            .await
            .unwrap();

        assert_eq!(staged.kind, DocumentKind::Pdf);
        assert_eq!(staged.stem, "Report");
        assert_eq!(staged.size, 8);
        let path = staged.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
        assert!(path.to_string_lossy().ends_with(".pdf"));

        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_stage_rejects_unsupported() {
        let err = StagedUpload::stage(UploadedDocument::new("notes.txt", b"hi".to_vec()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Unsupported file type");
    }
}
