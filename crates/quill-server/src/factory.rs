//! Factory for creating the application state from configuration.

use quill_core::error::QuillResult;
use quill_core::ServiceConfig;
use quill_extractors::ExtractionPipeline;
use quill_llm::LlmFactory;
use quill_render::DocumentEmitter;
use tracing::info;

use crate::state::AppState;

/// Build every service component described by `config`.
pub fn create_state(config: &ServiceConfig) -> QuillResult<AppState> {
    let llm = LlmFactory::create(config.llm.clone())?;
    let pipeline = ExtractionPipeline::with_defaults();
    let emitter = DocumentEmitter::from_config(&config.render);

    info!(
        model = %llm.model_name(),
        extractors = pipeline.len(),
        converter = emitter.converter_name(),
        "Service components ready"
    );

    Ok(AppState::new(pipeline, llm, emitter).with_upload_limit(config.server.max_upload_bytes))
}
