//! API Handlers
//!
//! Request handlers for the cache monitor endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::caches::{AppCaches, CacheKind};
use crate::config::Config;
use crate::error::Result;
use crate::models::{CleanupResponse, ClearResponse, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub caches: AppCaches,
}

impl AppState {
    pub fn new(caches: AppCaches) -> Self {
        Self { caches }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(AppCaches::from_config(config))
    }
}

/// Handler for GET /stats
pub async fn all_stats_handler(State(state): State<AppState>) -> Json<Vec<StatsResponse>> {
    let stats = state.caches.stats_all().await;
    Json(
        stats
            .iter()
            .map(|(kind, stats)| StatsResponse::new(*kind, stats))
            .collect(),
    )
}

/// Handler for GET /stats/:cache
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<StatsResponse>> {
    let kind: CacheKind = cache.parse()?;
    let stats = state.caches.stats(kind).await;

    Ok(Json(StatsResponse::new(kind, &stats)))
}

/// Handler for POST /caches/:cache/stats/reset
pub async fn reset_stats_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<StatsResponse>> {
    let kind: CacheKind = cache.parse()?;
    let stats = state.caches.reset_stats(kind).await;

    Ok(Json(StatsResponse::new(kind, &stats)))
}

/// Handler for POST /caches/:cache/cleanup
pub async fn cleanup_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<CleanupResponse>> {
    let kind: CacheKind = cache.parse()?;
    let removed = state.caches.cleanup(kind).await;

    Ok(Json(CleanupResponse {
        cache: kind,
        removed,
    }))
}

/// Handler for DELETE /caches/:cache
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<ClearResponse>> {
    let kind: CacheKind = cache.parse()?;
    let cleared = state.caches.clear(kind).await;

    Ok(Json(ClearResponse {
        cache: kind,
        cleared,
    }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
