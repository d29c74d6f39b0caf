//! Router configuration for the web server.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Comparison page and its forms
        .route("/", get(handlers::index))
        .route("/documents/:side", post(handlers::upload_document))
        .route("/documents/:side/clear", post(handlers::clear_document))
        .route("/compare", post(handlers::compare_documents))
        // JSON API
        .route("/api/compare", post(handlers::api_compare))
        .route("/api/status", get(handlers::api_status))
        .route("/health", get(handlers::health))
        // Static assets
        .route("/static/style.css", get(handlers::serve_css))
        // Documents of any size are accepted
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
