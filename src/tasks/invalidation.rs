//! Cache Invalidation Task
//!
//! Fire-and-forget deletion of a cache key after a successful store write.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheClient, CacheStats};

/// Spawns a detached task deleting `key` from the cache.
///
/// The write path never awaits the returned handle. A failed delete is logged
/// and counted; there is no retry, the entry then lives until its TTL.
///
/// # Returns
/// A JoinHandle resolving to true if the delete reached the cache.
pub fn spawn_invalidation(
    cache: Arc<dyn CacheClient>,
    stats: Arc<CacheStats>,
    key: String,
) -> JoinHandle<bool> {
    tokio::spawn(async move {
        match cache.delete(&key).await {
            Ok(removed) => {
                debug!(key = %key, removed, "cache invalidated");
                stats.record_invalidation(true);
                true
            }
            Err(e) => {
                warn!(key = %key, error = %e, "cache invalidation failed");
                stats.record_invalidation(false);
                false
            }
        }
    })
}
