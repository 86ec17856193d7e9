//! API Routes
//!
//! Configures the Axum router for the cache monitor.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    all_stats_handler, cleanup_handler, clear_handler, health_handler, reset_stats_handler,
    stats_handler, AppState,
};

/// Creates the monitor router.
///
/// # Endpoints
/// - `GET /health`
/// - `GET /stats` - stats of every cache
/// - `GET /stats/:cache` - stats of one cache
/// - `POST /caches/:cache/cleanup` - sweep expired entries now
/// - `POST /caches/:cache/stats/reset` - zero the counters
/// - `DELETE /caches/:cache` - drop every entry
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(all_stats_handler))
        .route("/stats/:cache", get(stats_handler))
        .route("/caches/:cache", delete(clear_handler))
        .route("/caches/:cache/cleanup", post(cleanup_handler))
        .route("/caches/:cache/stats/reset", post(reset_stats_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
