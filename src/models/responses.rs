//! Response DTOs for the cache monitor API

use serde::Serialize;

use crate::cache::CacheStats;
use crate::caches::CacheKind;

/// Stats of one cache (GET /stats, GET /stats/:cache)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache: CacheKind,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    /// Current number of stored entries
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(cache: CacheKind, stats: &CacheStats) -> Self {
        Self {
            cache,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Result of a manual sweep (POST /caches/:cache/cleanup)
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    pub cache: CacheKind,
    pub removed: usize,
}

/// Result of emptying a cache (DELETE /caches/:cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub cache: CacheKind,
    pub cleared: usize,
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
