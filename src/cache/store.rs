//! Cache Store Module
//!
//! Generic TTL key-value cache with lazy expiration, sweep cleanup and an
//! optional LRU capacity bound.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::entry::current_timestamp_ns;
use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == TTL Cache ==
/// One isolated cache instance holding values of a single type.
///
/// Reads check expiration first, so an expired entry is never returned even
/// if [`cleanup`](TtlCache::cleanup) has not run yet.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Instance name, used in logs and stats reports
    name: String,
    entries: HashMap<String, CacheEntry<V>>,
    lru: LruTracker,
    stats: CacheStats,
    /// Upper bound on stored entries, 0 = unbounded
    max_entries: usize,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
    /// Lower bound on every stored `expires_at`, exact after a sweep
    earliest_expiry: u64,
}

impl<V> TtlCache<V> {
    // == Constructor ==
    /// Creates an unbounded cache.
    pub fn new(name: impl Into<String>, default_ttl: Duration) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: 0,
            default_ttl,
            earliest_expiry: u64::MAX,
        }
    }

    /// Bounds the cache to `max_entries` (0 keeps it unbounded).
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    // == Accessors ==
    /// Returns the instance name used in logs and stats reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the TTL applied when `set` gets no explicit one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns the entry bound, 0 when unbounded.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    // == Set ==
    /// Inserts or overwrites `key`, resetting its expiration.
    ///
    /// `ttl = None` applies the instance default. Inserting a new key into a
    /// full cache first sweeps expired entries, then evicts the least
    /// recently used one.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        let now = current_timestamp_ns();

        if !self.entries.contains_key(&key) {
            self.make_room(now);
        }

        let entry = CacheEntry::new_at(value, ttl.unwrap_or(self.default_ttl), now);
        self.earliest_expiry = self.earliest_expiry.min(entry.expires_at);
        self.lru.touch(&key);
        self.entries.insert(key, entry);
    }

    // == Delete ==
    /// Removes `key`; returns whether a live entry was removed.
    ///
    /// An entry whose TTL already elapsed but which was not swept yet is
    /// removed as well, yet reported as `false` and counted as an
    /// expiration: it was no longer readable.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.lru.remove(key);
                if entry.is_expired() {
                    self.stats.record_expirations(1);
                    false
                } else {
                    true
                }
            }
            None => false,
        }
    }

    // == Clear ==
    /// Drops every entry. Hit and miss counters are kept.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.earliest_expiry = u64::MAX;
        debug!(cache = %self.name, removed = count, "cache cleared");
    }

    // == Cleanup ==
    /// Removes every entry whose expiration is at or before now.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        self.cleanup_at(current_timestamp_ns())
    }

    /// Sweep against a fixed timestamp in Unix nanoseconds.
    pub fn cleanup_at(&mut self, now: u64) -> usize {
        let mut expired_keys = Vec::new();
        let mut earliest = u64::MAX;

        for (key, entry) in &self.entries {
            if entry.is_expired_at(now) {
                expired_keys.push(key.clone());
            } else {
                earliest = earliest.min(entry.expires_at);
            }
        }

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.earliest_expiry = earliest;
        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    // == Stats ==
    /// Returns a snapshot of the counters with the current entry count.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Zeroes hit, miss, eviction and expiration counters.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // == Inspection ==
    /// Whether `key` holds a live entry. Does not count as a read.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    /// Remaining lifetime of a live entry. Does not count as a read.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = current_timestamp_ns();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.ttl_remaining_at(now))
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn raw_expires_at(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.expires_at)
    }

    // == Make Room ==
    /// Frees a slot for a new key in a full cache.
    ///
    /// Sweeps only once some entry may have expired, so a full cache of
    /// live entries goes straight to LRU eviction.
    fn make_room(&mut self, now: u64) {
        if self.max_entries == 0 || self.entries.len() < self.max_entries {
            return;
        }

        if now >= self.earliest_expiry {
            self.cleanup_at(now);
        }

        while self.entries.len() >= self.max_entries {
            let Some(oldest) = self.lru.evict_oldest() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.record_eviction();
            debug!(cache = %self.name, key = %oldest, "evicted least recently used entry");
        }
    }
}

impl<V: Clone> TtlCache<V> {
    // == Get ==
    /// Returns a copy of the live value for `key`.
    ///
    /// An expired entry is deleted on the spot and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = current_timestamp_ns();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                self.lru.touch(key);
                Some(value)
            }
            Some(_) => {
                self.entries.remove(key);
                self.lru.remove(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                trace!(cache = %self.name, key, "lazily expired entry");
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Get Or Insert ==
    /// Returns the live value for `key`, or computes, stores and returns one.
    pub fn get_or_insert_with<F>(&mut self, key: &str, ttl: Option<Duration>, f: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = f();
        self.set(key, value.clone(), ttl);
        value
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const LONG: Duration = Duration::from_secs(300);

    fn cache() -> TtlCache<i32> {
        TtlCache::new("test", LONG)
    }

    #[test]
    fn test_set_and_get() {
        let mut cache: TtlCache<serde_json::Value> = TtlCache::new("api", LONG);

        cache.set(
            "profile_123",
            serde_json::json!({ "name": "Alice" }),
            Some(Duration::from_millis(5000)),
        );

        assert_eq!(
            cache.get("profile_123"),
            Some(serde_json::json!({ "name": "Alice" }))
        );
    }

    #[test]
    fn test_get_missing_is_miss() {
        let mut cache = cache();
        assert_eq!(cache.get("nope"), None);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_short_ttl_expires() {
        let mut cache = cache();
        cache.set("temp", 42, Some(Duration::from_millis(10)));

        sleep(Duration::from_millis(20));

        assert_eq!(cache.get("temp"), None);
        let stats = cache.stats();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_sub_millisecond_ttl_is_readable() {
        let mut cache = cache();
        cache.set("k", 1, Some(Duration::from_micros(900)));

        assert_eq!(cache.get("k"), Some(1));
    }

    #[test]
    fn test_sub_millisecond_default_ttl_is_readable() {
        let mut cache: TtlCache<i32> = TtlCache::new("tiny", Duration::from_micros(500));
        cache.set("k", 1, None);

        assert_eq!(cache.get("k"), Some(1));

        sleep(Duration::from_millis(2));

        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_zero_ttl_never_readable() {
        let mut cache = cache();
        cache.set("gone", 1, Some(Duration::ZERO));

        assert!(!cache.contains_key("gone"));
        assert_eq!(cache.get("gone"), None);
    }

    #[test]
    fn test_default_ttl_applies() {
        let mut cache: TtlCache<i32> = TtlCache::new("short", Duration::from_millis(30));
        cache.set("a", 1, None);
        assert_eq!(cache.get("a"), Some(1));

        sleep(Duration::from_millis(50));

        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_overwrite_resets_expiration() {
        let mut cache = cache();
        cache.set("k", 1, Some(Duration::from_millis(40)));
        cache.set("k", 2, Some(Duration::from_secs(60)));

        sleep(Duration::from_millis(60));

        assert_eq!(cache.get("k"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_delete() {
        let mut cache = cache();
        cache.set("a", 1, None);

        assert!(cache.delete("a"));
        assert!(!cache.delete("a"));
        assert_eq!(cache.get("a"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_delete_expired_reports_false() {
        let mut cache = cache();
        cache.set("a", 1, Some(Duration::ZERO));

        assert!(!cache.delete("a"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_keeps_counters() {
        let mut cache = cache();
        cache.set("a", 1, None);
        cache.set("b", 2, None);
        cache.get("a");

        cache.clear();

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
        let stats = cache.stats();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
    }

    #[test]
    fn test_cleanup_removes_only_expired() {
        let mut cache = cache();
        cache.set("a", 1, Some(Duration::from_millis(1000)));
        cache.set("b", 2, Some(Duration::from_millis(100_000)));

        sleep(Duration::from_millis(1100));

        assert_eq!(cache.cleanup(), 1);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_cleanup_at_boundary() {
        let mut cache = cache();
        cache.set("a", 1, Some(Duration::from_secs(10)));
        let expires_at = cache.entries["a"].expires_at;

        assert_eq!(cache.cleanup_at(expires_at - 1), 0);
        assert_eq!(cache.cleanup_at(expires_at), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cleanup_leaves_remaining_ttl_unchanged() {
        let mut cache = cache();
        cache.set("keep", 1, Some(Duration::from_secs(60)));
        let before = cache.entries["keep"].expires_at;

        cache.cleanup();

        assert_eq!(cache.entries["keep"].expires_at, before);
    }

    #[test]
    fn test_hit_rate() {
        let mut cache = cache();
        cache.set("a", 1, None);
        cache.get("a");
        cache.get("a");
        cache.get("a");
        cache.get("b");

        assert!((cache.stats().hit_rate() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_reset_stats() {
        let mut cache = cache();
        cache.set("a", 1, None);
        cache.get("a");
        cache.get("x");

        cache.reset_stats();

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let mut cache = cache().with_max_entries(3);
        cache.set("a", 1, None);
        cache.set("b", 2, None);
        cache.set("c", 3, None);
        cache.get("a");

        cache.set("d", 4, None);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_capacity_prefers_expired_over_eviction() {
        let mut cache = cache().with_max_entries(2);
        cache.set("stale", 1, Some(Duration::ZERO));
        cache.set("fresh", 2, None);

        cache.set("new", 3, None);

        assert_eq!(cache.get("fresh"), Some(2));
        assert_eq!(cache.get("new"), Some(3));
        let stats = cache.stats();
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.expirations, 1);
    }

    #[test]
    fn test_full_cache_of_live_entries_skips_sweep() {
        let mut cache = cache().with_max_entries(2);
        cache.set("a", 1, None);
        cache.set("b", 2, None);
        let bound = cache.earliest_expiry;
        assert_eq!(bound, cache.entries["a"].expires_at);

        cache.set("c", 3, None);

        // No sweep ran, so the bound was not recomputed past "a".
        assert_eq!(cache.earliest_expiry, bound);
        assert_eq!(cache.stats().evictions, 1);
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_stale_expiry_bound_is_refreshed_by_sweep() {
        let mut cache = cache().with_max_entries(2);
        cache.set("a", 1, Some(Duration::ZERO));
        cache.set("a", 1, None);
        cache.set("b", 2, None);

        cache.set("c", 3, None);

        // The sweep found nothing expired and tightened the bound to live entries.
        assert!(cache.earliest_expiry > cache.entries["c"].created_at);
        assert_eq!(cache.stats().expirations, 0);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut cache = cache().with_max_entries(2);
        cache.set("a", 1, None);
        cache.set("b", 2, None);
        cache.set("a", 10, None);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut cache = cache();
        let mut calls = 0;

        let first = cache.get_or_insert_with("stats", None, || {
            calls += 1;
            7
        });
        let second = cache.get_or_insert_with("stats", None, || {
            calls += 1;
            8
        });

        assert_eq!(first, 7);
        assert_eq!(second, 7);
        assert_eq!(calls, 1);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_inspection_does_not_count_reads() {
        let mut cache = cache();
        cache.set("a", 1, Some(Duration::from_secs(10)));

        assert!(cache.contains_key("a"));
        assert!(!cache.contains_key("b"));
        let remaining = cache.ttl_remaining("a").unwrap();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
        assert_eq!(cache.ttl_remaining("b"), None);
        assert_eq!(cache.stats().reads(), 0);
    }

    #[test]
    fn test_instances_are_isolated() {
        let mut a = cache();
        let mut b = cache();
        a.set("x", 1, None);

        assert_eq!(b.get("x"), None);
        assert_eq!(a.get("x"), Some(1));
    }
}
