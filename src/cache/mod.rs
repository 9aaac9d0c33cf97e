//! Cache Module
//!
//! The cache client abstraction used by the cache-aside layer, its
//! implementations, and the shared statistics counters.

mod disabled;
mod entry;
mod memory;
mod redis_client;
mod stats;

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

// Re-export public types
pub use disabled::DisabledCacheClient;
pub use entry::CacheEntry;
pub use memory::InMemoryCacheClient;
pub use redis_client::{RedisCacheClient, RedisCacheConfig};
pub use stats::{CacheStats, StatsSnapshot};

// == Public Constants ==
/// Namespace prefix of every product cache key
pub const PRODUCT_KEY_PREFIX: &str = "product";

/// Derives the cache key of a product.
///
/// The format is stable across restarts so a warm cache stays valid.
pub fn product_cache_key(id: u64) -> String {
    format!("{}:{}", PRODUCT_KEY_PREFIX, id)
}

/// Key-value cache with per-entry TTL.
///
/// Every failure is reported as a `CacheError` value; implementations never
/// panic on a degraded server.
#[async_trait]
pub trait CacheClient: Send + Sync + Debug {
    /// Returns the value stored under `key`, or None if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Returns true if an entry was removed.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Checks that the cache server answers.
    async fn ping(&self) -> Result<(), CacheError>;
}
