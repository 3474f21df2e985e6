//! Expiry Sweep Task
//!
//! Background task that periodically drops expired cache entries. Lookups
//! already treat expired entries as absent; the sweep only reclaims memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ItemCache;

/// Spawns a background task that purges expired cache entries every
/// `cleanup_interval_secs` seconds.
///
/// Returns the task handle so shutdown can abort it.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(ItemCache::default());
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 5);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<ItemCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache expiry sweep with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
