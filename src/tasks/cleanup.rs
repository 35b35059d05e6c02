//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired search results.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ExpiringCache;

/// Sweeps `cache` every `interval` until the returned handle is aborted.
///
/// The cache only drops expired entries when they are read; this sweep keeps
/// entries for searches nobody repeats from piling up.
///
/// ```ignore
/// let sweeper = spawn_cleanup_task(state.cache.clone(), Duration::from_secs(60));
/// // on shutdown
/// sweeper.abort();
/// ```
pub fn spawn_cleanup_task<V>(cache: Arc<ExpiringCache<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval.as_secs_f64()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup();

            if removed > 0 {
                info!(removed, remaining = cache.len(), "Cache cleanup removed expired entries");
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}
