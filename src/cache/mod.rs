//! Cache Module
//!
//! Ephemeral in-memory cache for database reads: per-entry TTL, a fixed
//! capacity with oldest-first eviction, and wildcard invalidation.

mod clock;
mod entry;
mod pattern;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use pattern::KeyPattern;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default capacity of the store
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// TTL presets used by callers.
pub mod ttl {
    use std::time::Duration;

    /// Frequently changing data (progress, recent results)
    pub const SHORT: Duration = Duration::from_secs(60);
    /// Default for most reads
    pub const MEDIUM: Duration = Duration::from_secs(5 * 60);
    /// Reference data that rarely changes (workshops, métiers)
    pub const LONG: Duration = Duration::from_secs(15 * 60);
    pub const VERY_LONG: Duration = Duration::from_secs(60 * 60);
}
