//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::{CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{CacheAdminQuery, HealthResponse, InvalidateResponse, StatsResponse};

// == Admin Gate ==
/// Shared-secret check for the admin endpoints.
///
/// Only enforced in production mode. A production deployment without a
/// configured secret rejects every request.
#[derive(Debug, Clone, Default)]
pub struct AdminGate {
    production: bool,
    secret: Option<String>,
}

impl AdminGate {
    pub fn new(production: bool, secret: Option<String>) -> Self {
        Self { production, secret }
    }

    /// Checks the secret supplied by the caller.
    pub fn authorize(&self, supplied: Option<&str>) -> Result<()> {
        if !self.production {
            return Ok(());
        }

        match (self.secret.as_deref(), supplied) {
            (Some(expected), Some(given)) if expected == given => Ok(()),
            _ => {
                warn!("rejected cache admin request");
                Err(ApiError::Unauthorized)
            }
        }
    }
}

/// Application state shared across all handlers.
///
/// Owns the process-wide cache; collaborators memoize through `cache`.
#[derive(Clone)]
pub struct AppState {
    /// Cache of JSON-encoded database reads
    pub cache: SharedCache<Value>,
    /// Admin endpoint access check
    pub gate: AdminGate,
}

impl AppState {
    /// Creates a new AppState with the given store and gate.
    pub fn new(store: CacheStore<Value>, gate: AdminGate) -> Self {
        Self {
            cache: SharedCache::new(store),
            gate,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let store = CacheStore::new(config.max_entries, config.default_ttl());
        let gate = AdminGate::new(config.production, config.cache_secret.clone());
        Self::new(store, gate)
    }
}

/// Handler for GET /api/cache
///
/// Returns size, capacity, keys and counters.
pub async fn stats_handler(
    State(state): State<AppState>,
    Query(query): Query<CacheAdminQuery>,
) -> Result<Json<StatsResponse>> {
    state.gate.authorize(query.secret.as_deref())?;

    let stats = state.cache.stats().await;
    Ok(Json(StatsResponse::new(stats)))
}

/// Handler for DELETE /api/cache
///
/// Invalidates keys matching `pattern`, or clears the cache when no
/// pattern is given.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Query(query): Query<CacheAdminQuery>,
) -> Result<Json<InvalidateResponse>> {
    state.gate.authorize(query.secret.as_deref())?;

    if let Some(error_msg) = query.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let response = match query.pattern.as_deref() {
        Some(pattern) => {
            let removed = state.cache.invalidate_pattern(pattern).await;
            info!(pattern, removed, "cache pattern invalidated");
            InvalidateResponse::pattern(pattern, removed)
        }
        None => {
            let removed = state.cache.clear().await;
            info!(removed, "cache cleared");
            InvalidateResponse::cleared(removed)
        }
    };

    Ok(Json(response))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
