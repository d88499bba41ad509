//! Axum router: maps all URL paths to handlers.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    analyze::{analyze_submit, api_analyze},
    document::{document_file, document_url},
    home::home,
    questions::{questions_sample, questions_submit},
};
use crate::sse::sse_handler;
use crate::state::SharedState;

/// Headroom for multipart framing on top of the file size limit.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

/// Build and return the full Axum router.
pub fn build_router(state: SharedState) -> Router {
    let upload_limit = (state.upload_policy.max_bytes + MULTIPART_OVERHEAD) as usize;

    Router::new()
        // Pages
        .route("/",                  get(home))
        .route("/document/url",      post(document_url))
        .route("/document/file",     post(document_file).layer(DefaultBodyLimit::max(upload_limit)))
        .route("/questions",         post(questions_submit))
        .route("/questions/sample",  post(questions_sample))
        .route("/analyze",           post(analyze_submit))

        // SSE streaming
        .route("/api/events", get(sse_handler))

        // API endpoints
        .route("/api/analyze", post(api_analyze))

        // Static files
        .nest_service("/static", ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
