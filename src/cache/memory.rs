//! In-memory cache client
//!
//! Process-local HashMap storage with TTL expiration. Expired entries are
//! treated as absent on read and swept by the background cleanup task.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheClient, CacheEntry};
use crate::error::CacheError;

// == In-Memory Cache Client ==
#[derive(Debug, Default)]
pub struct InMemoryCacheClient {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCacheClient {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Returns the remaining TTL of a live entry.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        self.entries
            .read()
            .await
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(CacheEntry::ttl_remaining)
    }
}

#[async_trait]
impl CacheClient for InMemoryCacheClient {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let entry = CacheEntry::new(value.to_string(), ttl);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
