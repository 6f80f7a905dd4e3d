//! Shared Cache Module
//!
//! Thread-safe handle around a [`CacheStore`] plus the get-or-compute
//! memoizer used by request handlers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};

// == Shared Cache ==
/// Cloneable handle to one process-wide store.
///
/// Each method holds the lock only for the duration of a single store
/// operation, never across an `.await` on caller code.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    /// Wraps a store for shared use.
    pub fn new(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns the value for `key` if present and fresh.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }

    /// Stores a value; `None` TTL uses the store default.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.inner.write().await.set(key, value, ttl);
    }

    /// Removes one key, returning whether it was present.
    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    /// Removes every entry, returning how many were dropped.
    pub async fn clear(&self) -> usize {
        self.inner.write().await.clear()
    }

    /// Removes keys matching a `*`-wildcard pattern, returning the count.
    pub async fn invalidate_pattern(&self, pattern: &str) -> usize {
        self.inner.write().await.invalidate_pattern(pattern)
    }

    /// Removes expired entries, returning the count.
    pub async fn purge_expired(&self) -> usize {
        self.inner.write().await.purge_expired()
    }

    /// Snapshot of size, capacity, keys and counters.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, or runs `producer` and caches
    /// its result.
    ///
    /// The producer runs at most once per call. Its error is returned
    /// unchanged and nothing is stored. Concurrent calls on a cold key may
    /// each run their own producer; the last one to finish wins the slot.
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `producer` - Async computation yielding the value
    /// * `ttl` - TTL for the stored result (store default if None)
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        producer: F,
        ttl: Option<Duration>,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        let value = producer().await?;
        self.set(key, value.clone(), ttl).await;
        debug!(key, "cached computed value");
        Ok(value)
    }
}

impl SharedCache<serde_json::Value> {
    // == Get Or Compute (typed) ==
    /// Typed get-or-compute over a JSON-valued store.
    ///
    /// A cached value that does not deserialize as `T` counts as a miss and
    /// is recomputed and replaced. A result that cannot be serialized is
    /// returned uncached.
    pub async fn get_or_compute_as<T, F, Fut, E>(
        &self,
        key: &str,
        producer: F,
        ttl: Option<Duration>,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.get(key).await {
            match serde_json::from_value::<T>(cached) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    warn!(key, error = %err, "cached value has unexpected shape");
                    self.inner.write().await.reject_hit();
                }
            }
        }

        let value = producer().await?;
        match serde_json::to_value(&value) {
            Ok(json) => self.set(key, json, ttl).await,
            Err(err) => warn!(key, error = %err, "computed value not cacheable"),
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ttl, ManualClock};
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn shared_with_clock<V: Clone>() -> (SharedCache<V>, ManualClock) {
        let clock = ManualClock::new(0);
        let store = CacheStore::with_clock(100, ttl::MEDIUM, Arc::new(clock.clone()));
        (SharedCache::new(store), clock)
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Workshop {
        id: u32,
        title: String,
    }

    #[tokio::test]
    async fn test_get_or_compute_calls_producer_once() {
        let (cache, _) = shared_with_clock::<Vec<u32>>();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let producer = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(vec![1, 2, 3])
        };

        let first = cache
            .get_or_compute("workshop:all", producer, Some(ttl::SHORT))
            .await
            .unwrap();
        let second = cache
            .get_or_compute("workshop:all", producer, Some(ttl::SHORT))
            .await
            .unwrap();

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(second, first);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_compute_recomputes_after_expiry() {
        let (cache, clock) = shared_with_clock::<u32>();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let producer =
            move || async move { Ok::<_, String>(counter.fetch_add(1, Ordering::SeqCst) as u32) };

        let first = cache
            .get_or_compute("videos:all", producer, Some(Duration::from_secs(1)))
            .await
            .unwrap();
        clock.advance(Duration::from_secs(2));
        let second = cache
            .get_or_compute("videos:all", producer, Some(Duration::from_secs(1)))
            .await
            .unwrap();

        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_or_compute_propagates_error_without_caching() {
        let (cache, _) = shared_with_clock::<String>();

        let result = cache
            .get_or_compute(
                "profiles:42",
                || async { Err::<String, _>("database unavailable") },
                None,
            )
            .await;

        assert_eq!(result, Err("database unavailable"));
        assert_eq!(cache.get("profiles:42").await, None);
        assert!(cache.stats().await.keys.is_empty());
    }

    #[tokio::test]
    async fn test_get_or_compute_as_round_trips_typed_values() {
        let (cache, _) = shared_with_clock::<serde_json::Value>();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let producer = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(vec![Workshop {
                id: 1,
                title: "Sécurité".to_string(),
            }])
        };

        let first: Vec<Workshop> = cache
            .get_or_compute_as("workshop:all", producer, None)
            .await
            .unwrap();
        let second: Vec<Workshop> = cache
            .get_or_compute_as("workshop:all", producer, None)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_compute_as_replaces_mismatched_shape() {
        let (cache, _) = shared_with_clock::<serde_json::Value>();
        cache.set("workshop:1", json!("not a workshop"), None).await;

        let workshop: Workshop = cache
            .get_or_compute_as(
                "workshop:1",
                || async {
                    Ok::<_, String>(Workshop {
                        id: 1,
                        title: "Habilitation".to_string(),
                    })
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(workshop.id, 1);
        assert_eq!(
            cache.get("workshop:1").await,
            Some(json!({"id": 1, "title": "Habilitation"}))
        );
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let (cache, _) = shared_with_clock::<u32>();
        let other = cache.clone();

        cache.set("metier:1", 7, None).await;

        assert_eq!(other.get("metier:1").await, Some(7));
        assert!(other.delete("metier:1").await);
        assert_eq!(cache.get("metier:1").await, None);
    }

    #[tokio::test]
    async fn test_get_or_compute_producer_can_use_cache() {
        let (cache, _) = shared_with_clock::<u32>();
        cache.set("other", 5, None).await;
        let handle = cache.clone();

        let result = tokio::time::timeout(
            Duration::from_secs(1),
            cache.get_or_compute(
                "derived",
                move || async move {
                    let base = handle.get("other").await.unwrap_or(0);
                    Ok::<_, String>(base + 1)
                },
                None,
            ),
        )
        .await;

        assert_eq!(result, Ok(Ok(6)));
        assert_eq!(cache.get("derived").await, Some(6));
    }

    #[tokio::test]
    async fn test_get_or_compute_as_returns_unserializable_value_uncached() {
        let (cache, _) = shared_with_clock::<serde_json::Value>();

        // JSON object keys must be strings, so tuple keys fail to serialize
        let result: Result<HashMap<(u8, u8), u8>, String> = cache
            .get_or_compute_as(
                "reading_progress:u1",
                || async { Ok(HashMap::from([((1, 2), 3)])) },
                None,
            )
            .await;

        assert_eq!(result.unwrap().get(&(1, 2)), Some(&3));
        assert!(cache.stats().await.keys.is_empty());
    }

    #[tokio::test]
    async fn test_get_or_compute_as_counts_mismatched_shape_as_miss() {
        let (cache, _) = shared_with_clock::<serde_json::Value>();
        cache.set("workshop:2", json!(42), None).await;

        let _: Workshop = cache
            .get_or_compute_as(
                "workshop:2",
                || async {
                    Ok::<_, String>(Workshop {
                        id: 2,
                        title: "Travail en hauteur".to_string(),
                    })
                },
                None,
            )
            .await
            .unwrap();

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
    }
}
