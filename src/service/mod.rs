//! Product Service
//!
//! Cache-aside orchestration in front of the product store.
//!
//! Reads try the cache first and fall back to the store, refilling the cache
//! with the configured TTL. Writes go to the store only; on success the cache
//! entry is deleted by a detached task. Every cache failure is absorbed here:
//! it is logged and counted, never returned.
//!
//! A read that misses concurrently with a write may refill the cache with the
//! pre-write product after the invalidation ran. That entry stays until its
//! TTL expires.

#[cfg(test)]
mod property_tests;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{product_cache_key, CacheClient, CacheStats, StatsSnapshot};
use crate::error::{CacheError, StoreError};
use crate::models::{Product, ProductUpdate};
use crate::store::ProductStore;
use crate::tasks::spawn_invalidation;

/// Cache-aside front for a `ProductStore`.
///
/// Cheap to clone; clones share the store, the cache connection and the
/// statistics counters.
#[derive(Debug, Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    cache: Arc<dyn CacheClient>,
    stats: Arc<CacheStats>,
    ttl: Duration,
}

impl ProductService {
    /// Creates a service caching products for `ttl`.
    pub fn new(store: Arc<dyn ProductStore>, cache: Arc<dyn CacheClient>, ttl: Duration) -> Self {
        Self {
            store,
            cache,
            stats: Arc::new(CacheStats::new()),
            ttl,
        }
    }

    /// The shared cache handle.
    pub fn cache(&self) -> &Arc<dyn CacheClient> {
        &self.cache
    }

    /// Current cache statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    // == Read ==
    /// Returns a product, from the cache when possible.
    ///
    /// Fails only if the store fails or the product does not exist.
    pub async fn get_product(&self, id: u64) -> Result<Product, StoreError> {
        let key = product_cache_key(id);

        if let Some(product) = self.read_cached(&key).await {
            return Ok(product);
        }

        self.stats.record_store_read();
        let product = self.store.get(id).await?;
        self.populate(&key, &product).await;

        Ok(product)
    }

    // == Write ==
    /// Applies an update in the store and schedules cache invalidation.
    ///
    /// Store failures propagate without any cache operation. The invalidation
    /// runs detached and its outcome never affects the returned product.
    pub async fn update_product(
        &self,
        id: u64,
        update: &ProductUpdate,
    ) -> Result<Product, StoreError> {
        let product = self.store.update(id, update).await?;

        spawn_invalidation(
            self.cache.clone(),
            self.stats.clone(),
            product_cache_key(id),
        );

        Ok(product)
    }

    async fn read_cached(&self, key: &str) -> Option<Product> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match decode(&raw) {
                Ok(product) => {
                    debug!(key, "cache hit");
                    self.stats.record_hit();
                    Some(product)
                }
                Err(e) => {
                    // Overwritten by the refill that follows
                    warn!(key, error = %e, "discarding undecodable cache entry");
                    self.stats.record_miss();
                    None
                }
            },
            Ok(None) => {
                debug!(key, "cache miss");
                self.stats.record_miss();
                None
            }
            Err(e) => {
                warn!(key, error = %e, "cache read failed, falling back to store");
                self.stats.record_cache_error();
                self.stats.record_miss();
                None
            }
        }
    }

    async fn populate(&self, key: &str, product: &Product) {
        let raw = match encode(product) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "failed to encode product for cache");
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &raw, self.ttl).await {
            warn!(key, error = %e, "cache write failed, serving from store");
            self.stats.record_cache_error();
        }
    }
}

fn encode(product: &Product) -> Result<String, CacheError> {
    serde_json::to_string(product).map_err(|e| CacheError::Serialization(e.to_string()))
}

fn decode(raw: &str) -> Result<Product, CacheError> {
    serde_json::from_str(raw).map_err(|e| CacheError::Serialization(e.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::store::InMemoryProductStore;

    /// Store wrapper counting calls.
    #[derive(Debug)]
    pub struct CountingStore {
        inner: InMemoryProductStore,
        pub gets: AtomicUsize,
        pub updates: AtomicUsize,
    }

    impl CountingStore {
        pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
            Self {
                inner: InMemoryProductStore::new(products),
                gets: AtomicUsize::new(0),
                updates: AtomicUsize::new(0),
            }
        }

        pub fn gets(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductStore for CountingStore {
        async fn get(&self, id: u64) -> Result<Product, StoreError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get(id).await
        }

        async fn update(&self, id: u64, update: &ProductUpdate) -> Result<Product, StoreError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.inner.update(id, update).await
        }
    }

    /// Cache recording every operation, optionally failing all of them.
    #[derive(Debug, Default)]
    pub struct RecordingCache {
        entries: Mutex<HashMap<String, (String, Duration)>>,
        pub ops: Mutex<Vec<String>>,
        failing: bool,
    }

    impl RecordingCache {
        pub fn failing() -> Self {
            Self {
                failing: true,
                ..Default::default()
            }
        }

        pub fn ops(&self) -> Vec<String> {
            self.ops.lock().unwrap().clone()
        }

        pub fn entry(&self, key: &str) -> Option<(String, Duration)> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        pub fn insert_raw(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), Duration::from_secs(60)));
        }

        fn record(&self, op: &str, key: &str) -> Result<(), CacheError> {
            self.ops.lock().unwrap().push(format!("{} {}", op, key));
            if self.failing {
                return Err(CacheError::Unavailable("connection refused".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CacheClient for RecordingCache {
        async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            self.record("get", key)?;
            Ok(self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone()))
        }

        async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
            self.record("set", key)?;
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), ttl));
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<bool, CacheError> {
            self.record("delete", key)?;
            Ok(self.entries.lock().unwrap().remove(key).is_some())
        }

        async fn ping(&self) -> Result<(), CacheError> {
            self.record("ping", "-")
        }
    }

    /// Polls until `key` is gone from the cache or a second has passed.
    pub async fn wait_for_invalidation(cache: &RecordingCache, key: &str) -> bool {
        for _ in 0..100 {
            if cache.entry(key).is_none() && cache.ops().iter().any(|op| op.starts_with("delete")) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}
