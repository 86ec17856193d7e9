//! Cache Module
//!
//! Generic in-memory caching with TTL expiration and an optional LRU bound.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ns, CacheEntry};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::TtlCache;

use std::sync::Arc;
use tokio::sync::RwLock;

/// A cache instance shared between its owner and background tasks.
pub type SharedCache<V> = Arc<RwLock<TtlCache<V>>>;

/// Wraps a cache for sharing.
pub fn shared<V>(cache: TtlCache<V>) -> SharedCache<V> {
    Arc::new(RwLock::new(cache))
}
