//! quill-server - REST API server for quill.
//!
//! Exposes `POST /analyze_file` and `POST /correct_file` for PDF and DOCX
//! uploads, plus `GET /health`.
//!
//! # Example
//!
//! ```ignore
//! use quill_core::ServiceConfig;
//! use quill_server::{create_server, create_state};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::from_env()?;
//!     let app = create_server(create_state(&config)?);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod factory;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod upload;

pub use error::{ApiError, ApiResult};
pub use factory::create_state;
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes());
    routes::create_router(state)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
