//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Human-readable summary included with the stats.
pub const CACHE_DESCRIPTION: &str =
    "In-memory cache of database reads; entries expire after their TTL and the oldest entry is evicted at capacity";

/// Stats payload: the cache snapshot plus a description
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBody {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub hit_rate: f64,
    pub description: String,
}

/// Response body for `GET /api/cache`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: StatsBody,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a cache snapshot
    pub fn new(stats: CacheStats) -> Self {
        Self {
            success: true,
            stats: StatsBody {
                hit_rate: stats.hit_rate(),
                stats,
                description: CACHE_DESCRIPTION.to_string(),
            },
        }
    }
}

/// Response body for `DELETE /api/cache`
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub success: bool,
    /// What was removed
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl InvalidateResponse {
    /// Response for a pattern invalidation
    pub fn pattern(pattern: &str, removed: usize) -> Self {
        Self {
            success: true,
            message: format!("Invalidated {} entries matching '{}'", removed, pattern),
            removed,
        }
    }

    /// Response for a full clear
    pub fn cleared(removed: usize) -> Self {
        Self {
            success: true,
            message: format!("Cache cleared ({} entries)", removed),
            removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
