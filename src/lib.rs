//! edu_cache - in-memory TTL caches for the learning platform
//!
//! Provides a generic TTL cache, the platform's named cache instances, a
//! background cleanup task and an HTTP stats monitor.

pub mod api;
pub mod cache;
pub mod caches;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{SharedCache, TtlCache};
pub use caches::{AppCaches, CacheKind};
pub use config::Config;
pub use error::{CacheError, ConfigError};
pub use tasks::CleanupTask;
