use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::AppState;
use super::handlers::{get_document, health, list_documents, upload};
use crate::config::ServerConfig;
use crate::{DocsortError, Result};

/// Build the application router.
///
/// Fails when a configured CORS origin is not a valid header value.
pub fn create_router(state: AppState, config: &ServerConfig) -> Result<Router> {
    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                DocsortError::Configuration(format!("invalid CORS origin {origin:?}: {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Ok(Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/documents", get(list_documents))
        .route("/documents/{id}", get(get_document))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state))
}
