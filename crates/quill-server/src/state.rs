//! Server state management.

use std::sync::Arc;

use quill_core::{Analyzer, Corrector, Llm, ServerConfig};
use quill_extractors::ExtractionPipeline;
use quill_render::DocumentEmitter;

/// Shared application state.
///
/// Built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub pipeline: ExtractionPipeline,
    pub analyzer: Analyzer,
    pub corrector: Corrector,
    pub emitter: DocumentEmitter,
    pub model: String,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create the state around one chat-completion provider.
    pub fn new(pipeline: ExtractionPipeline, llm: Arc<dyn Llm>, emitter: DocumentEmitter) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pipeline,
                model: llm.model_name(),
                analyzer: Analyzer::new(llm.clone()),
                corrector: Corrector::new(llm),
                emitter,
                max_upload_bytes: ServerConfig::default().max_upload_bytes,
            }),
        }
    }

    /// Replace the analyzer, e.g. to change its fallback summary.
    pub fn with_analyzer(self, analyzer: Analyzer) -> Self {
        self.map_inner(|inner| inner.analyzer = analyzer)
    }

    /// Set the largest accepted request body.
    pub fn with_upload_limit(self, max_upload_bytes: usize) -> Self {
        self.map_inner(|inner| inner.max_upload_bytes = max_upload_bytes)
    }

    fn map_inner(self, f: impl FnOnce(&mut AppStateInner)) -> Self {
        let mut inner = match Arc::try_unwrap(self.inner) {
            Ok(inner) => inner,
            Err(shared) => AppStateInner {
                pipeline: shared.pipeline.clone(),
                analyzer: shared.analyzer.clone(),
                corrector: shared.corrector.clone(),
                emitter: shared.emitter.clone(),
                model: shared.model.clone(),
                max_upload_bytes: shared.max_upload_bytes,
            },
        };
        f(&mut inner);
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn pipeline(&self) -> &ExtractionPipeline {
        &self.inner.pipeline
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.inner.analyzer
    }

    pub fn corrector(&self) -> &Corrector {
        &self.inner.corrector
    }

    pub fn emitter(&self) -> &DocumentEmitter {
        &self.inner.emitter
    }

    /// Model identifier used for every completion.
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.inner.max_upload_bytes
    }
}
