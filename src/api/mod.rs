//! HTTP API for the analytics service.

pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

/// Build the service routes around shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Analysis
        .route("/analyze", post(handlers::analyze))
        .route("/bulk", post(handlers::analyze_bulk))
        .route("/analyzers", get(handlers::list_analyzers))
        .route("/analyzers/:name", post(handlers::run_analyzer))
        // History
        .route(
            "/history",
            get(handlers::list_history).delete(handlers::clear_history),
        )
        .route("/history/:id", get(handlers::get_history_entry))
        // State
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
