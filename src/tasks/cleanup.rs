//! TTL Sweep Task
//!
//! Background task that periodically drops expired cache entries. Reads
//! ignore expired entries on their own; the sweep also removes them from
//! the byte accounting used by the eviction check.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that purges expired entries every
/// `cleanup_interval_secs` seconds.
///
/// Returns a JoinHandle that can be aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CacheStore::new(64)));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    spawn_with_interval(cache, Duration::from_secs(cleanup_interval_secs))
}

pub(crate) fn spawn_with_interval(
    cache: Arc<RwLock<CacheStore>>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.purge_expired();

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
