use quill_core::DocumentKind;

/// A generated document returned to the client.
#[derive(Debug, Clone)]
pub struct CorrectedArtifact {
    /// Format of `bytes`.
    pub kind: DocumentKind,
    /// Download name, `<stem>_corrected.<ext>`.
    pub file_name: String,
    /// Document content.
    pub bytes: Vec<u8>,
}

impl CorrectedArtifact {
    pub fn new(kind: DocumentKind, stem: &str, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            file_name: format!("{}_corrected.{}", stem, kind.extension()),
            bytes,
        }
    }

    pub fn media_type(&self) -> &'static str {
        self.kind.media_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
