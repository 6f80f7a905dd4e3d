//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

// == Cache Entry ==
/// A stored value plus the bookkeeping needed to decide freshness.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// How long the value stays valid after `stored_at`
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stored at `now_ms`.
    pub fn new(value: V, now_ms: u64, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: now_ms,
            ttl,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was stored.
    ///
    /// Clamped to zero if the clock moved backwards.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at)
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is still valid while its age is less than or equal to the
    /// TTL; it expires only once the age strictly exceeds it.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        u128::from(self.age_ms(now_ms)) > self.ttl.as_millis()
    }

    // == Time To Live ==
    /// Returns the remaining lifetime at `now_ms`, zero once expired.
    pub fn ttl_remaining(&self, now_ms: u64) -> Duration {
        self.ttl
            .saturating_sub(Duration::from_millis(self.age_ms(now_ms)))
    }
}
