//! Error types for the cache crate
//!
//! Cache reads and writes never fail; errors come from naming a cache that
//! does not exist or from an unusable configuration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
#[derive(Error, Debug)]
pub enum CacheError {
    /// No cache instance is registered under this name
    #[error("Unknown cache: {0}")]
    UnknownCache(String),
}

// == Config Error Enum ==
/// Raised at startup, before any request is served.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// The background sweep needs a positive period
    #[error("Invalid configuration: cleanup interval must be greater than zero")]
    ZeroCleanupInterval,

    /// Every named cache needs a positive default TTL
    #[error("Invalid configuration: default TTL of the {0} cache must be greater than zero")]
    ZeroDefaultTtl(&'static str),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::UnknownCache(_) => StatusCode::NOT_FOUND,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, CacheError>;
