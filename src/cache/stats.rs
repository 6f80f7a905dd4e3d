//! Cache Statistics Module
//!
//! Snapshot of the store's size and keys, plus hit/miss/eviction counters.

use serde::Serialize;

// == Counters ==
/// Running counters kept by the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct Counters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Counters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Turns the last recorded hit into a miss.
    pub fn demote_hit(&mut self) {
        if self.hits > 0 {
            self.hits -= 1;
            self.misses += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Cache Stats ==
/// Diagnostic snapshot of the cache.
///
/// `keys` lists every stored key, including entries that have expired but
/// not yet been removed; it does not prove freshness.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,
    /// Capacity of the store
    pub max_size: usize,
    /// Stored keys, sorted
    pub keys: Vec<String>,
    /// Lookups that returned a fresh value
    pub hits: u64,
    /// Lookups that found nothing, an expired entry, or a rejected value
    pub misses: u64,
    /// Entries removed to stay within capacity
    pub evictions: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
