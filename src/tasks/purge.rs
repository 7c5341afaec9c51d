//! Expired Entry Purge Task
//!
//! Background task that periodically drops expired entries from a shared
//! `MemoryCache`. Lookups already ignore stale entries; this only frees
//! their memory without waiting for them to be touched.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns a background task that periodically purges expired entries.
///
/// The task sleeps for `interval_secs` between runs and takes the write
/// lock only for the duration of each sweep.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(MemoryCache::<String>::new()));
/// let purge_handle = spawn_purge_task(cache.clone(), 60);
/// // Later, during shutdown:
/// purge_handle.abort();
/// ```
pub fn spawn_purge_task<V>(
    cache: Arc<RwLock<MemoryCache<V>>>,
    interval_secs: u64,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting cache purge task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.purge_expired();

            if removed > 0 {
                info!(removed, "cache purge removed expired entries");
            } else {
                debug!("cache purge found no expired entries");
            }
        }
    })
}
