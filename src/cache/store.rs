//! Cache Store Module
//!
//! Main cache engine: a bounded map with TTL expiry, oldest-first eviction
//! and wildcard invalidation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::stats::Counters;
use crate::cache::{CacheEntry, CacheStats, Clock, KeyPattern, SystemClock};

// == Cache Store ==
/// Bounded in-memory store with per-entry TTL.
///
/// All operations are total: a missing or expired key is simply absent.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Hit/miss/eviction counters
    counters: Counters,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
    /// Time source
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new store backed by the system clock.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries (clamped to at least 1)
    /// * `default_ttl` - TTL for entries stored without an explicit one
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self::with_clock(max_entries, default_ttl, Arc::new(SystemClock))
    }

    /// Creates a new store reading time from `clock`.
    pub fn with_clock(max_entries: usize, default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            counters: Counters::default(),
            max_entries: max_entries.max(1),
            default_ttl,
            clock,
        }
    }

    // == Get ==
    /// Returns the value for `key` if present and fresh.
    ///
    /// An expired entry is removed and reported absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                let value = entry.value.clone();
                self.counters.record_hit();
                debug!(key, "cache hit");
                Some(value)
            }
            Some(_) => {
                self.entries.remove(key);
                self.counters.record_miss();
                debug!(key, "cache entry expired");
                None
            }
            None => {
                self.counters.record_miss();
                debug!(key, "cache miss");
                None
            }
        }
    }

    // == Reject Hit ==
    /// Counts the last successful lookup as a miss instead.
    ///
    /// Used when a caller finds the returned value unusable and recomputes it.
    pub fn reject_hit(&mut self) {
        self.counters.demote_hit();
    }

    // == Set ==
    /// Stores a value under `key`, stamped with the current time.
    ///
    /// Overwriting an existing key resets its timestamp and TTL. Inserting a
    /// new key into a full store first evicts the entry with the oldest
    /// timestamp.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - TTL for this entry (uses the default TTL if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }

        let entry = CacheEntry::new(
            value,
            self.clock.now_ms(),
            ttl.unwrap_or(self.default_ttl),
        );
        self.entries.insert(key, entry);
    }

    // == Evict Oldest ==
    /// Removes the entry with the smallest `stored_at`.
    ///
    /// Ties are broken by map iteration order.
    fn evict_oldest(&mut self) -> Option<String> {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.stored_at)
            .map(|(key, _)| key.clone())?;

        self.entries.remove(&oldest);
        self.counters.record_eviction();
        debug!(key = %oldest, "evicted oldest cache entry");
        Some(oldest)
    }

    // == Delete ==
    /// Removes an entry by key, returning whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes all entries, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    // == Invalidate Pattern ==
    /// Removes every entry whose key matches a `*`-wildcard pattern.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_pattern(&mut self, pattern: &str) -> usize {
        let pattern = match KeyPattern::compile(pattern) {
            Ok(pattern) => pattern,
            Err(err) => {
                warn!(pattern, error = %err, "cache pattern rejected");
                return 0;
            }
        };

        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| pattern.matches(key))
            .cloned()
            .collect();

        for key in &matching {
            self.entries.remove(key);
        }

        matching.len()
    }

    // == Purge Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
        }

        expired.len()
    }

    // == Stats ==
    /// Returns a snapshot of size, capacity, keys and counters.
    pub fn stats(&self) -> CacheStats {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();

        CacheStats {
            size: self.entries.len(),
            max_size: self.max_entries,
            keys,
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
        }
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capacity of the store.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// TTL applied when none is given.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
