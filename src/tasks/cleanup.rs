//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, so
//! keys nobody reads again do not linger until evicted.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically purges expired entries.
///
/// Returns `None` when `cleanup_interval_secs` is 0 (sweep disabled).
/// Otherwise the returned handle should be aborted on shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_cleanup_task(state.cache.clone(), 60);
/// // Later, during shutdown:
/// if let Some(handle) = handle { handle.abort(); }
/// ```
pub fn spawn_cleanup_task<V>(
    cache: SharedCache<V>,
    cleanup_interval_secs: u64,
) -> Option<JoinHandle<()>>
where
    V: Clone + Send + Sync + 'static,
{
    if cleanup_interval_secs == 0 {
        info!("Expiry sweep disabled");
        return None;
    }

    let interval = Duration::from_secs(cleanup_interval_secs);

    Some(tokio::spawn(async move {
        info!(
            "Starting expiry sweep with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    }))
}
