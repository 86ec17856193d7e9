//! Cache Entry Module
//!
//! A single cached value together with its creation and expiration times.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A stored value with absolute timestamps in Unix nanoseconds.
///
/// Nanoseconds keep the full precision of a `Duration`, so any positive TTL
/// leaves the entry readable after insertion.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion time, kept for bookkeeping
    pub created_at: u64,
    /// The entry is readable strictly before this instant
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after now.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self::new_at(value, ttl, current_timestamp_ns())
    }

    /// Creates an entry as if inserted at `now`.
    pub fn new_at(value: V, ttl: Duration, now: u64) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: now.saturating_add(duration_ns(ttl)),
        }
    }

    // == Is Expired ==
    /// Checks expiration against the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ns())
    }

    /// Checks expiration against a given timestamp.
    ///
    /// The boundary is inclusive: at `now == expires_at` the entry is
    /// already expired.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime, `Duration::ZERO` once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.ttl_remaining_at(current_timestamp_ns())
    }

    /// Remaining lifetime as seen at `now`.
    pub fn ttl_remaining_at(&self, now: u64) -> Duration {
        Duration::from_nanos(self.expires_at.saturating_sub(now))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in nanoseconds.
///
/// A clock set before the epoch reads as zero.
pub fn current_timestamp_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(duration_ns)
        .unwrap_or_default()
}

/// Converts a duration to whole nanoseconds, saturating at `u64::MAX`.
fn duration_ns(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const MS: u64 = 1_000_000;

    #[test]
    fn test_entry_expires_after_ttl() {
        let entry = CacheEntry::new("lesson".to_string(), Duration::from_millis(50));
        assert_eq!(entry.value, "lesson");
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_is_inclusive() {
        let entry = CacheEntry::new_at(1u32, Duration::from_millis(100), 1_000 * MS);

        assert_eq!(entry.created_at, 1_000 * MS);
        assert_eq!(entry.expires_at, 1_100 * MS);
        assert!(!entry.is_expired_at(1_100 * MS - 1));
        assert!(entry.is_expired_at(1_100 * MS));
        assert!(entry.is_expired_at(1_100 * MS + 1));
    }

    #[test]
    fn test_sub_millisecond_ttl_keeps_precision() {
        let entry = CacheEntry::new_at((), Duration::from_micros(900), 5 * MS);

        assert_eq!(entry.expires_at, 5 * MS + 900_000);
        assert!(!entry.is_expired_at(5 * MS));
        assert!(!entry.is_expired_at(5 * MS + 899_999));
        assert!(entry.is_expired_at(5 * MS + 900_000));
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new_at((), Duration::ZERO, 500);
        assert!(entry.is_expired_at(500));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new_at(0u8, Duration::from_secs(10), 0);

        assert_eq!(entry.ttl_remaining_at(4_000 * MS), Duration::from_secs(6));
        assert_eq!(entry.ttl_remaining_at(10_000 * MS), Duration::ZERO);
        assert_eq!(entry.ttl_remaining_at(99_000 * MS), Duration::ZERO);
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new_at(0u8, Duration::MAX, 10);
        assert_eq!(entry.expires_at, u64::MAX);
        assert!(!entry.is_expired_at(current_timestamp_ns()));
    }
}
