//! Cache client used when the cache server could not be reached at startup.
//!
//! Every call fails with `CacheError::Unavailable`, so the service runs
//! against the store alone.

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::CacheClient;
use crate::error::CacheError;

#[derive(Debug, Clone)]
pub struct DisabledCacheClient {
    reason: String,
}

impl DisabledCacheClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable(&self) -> CacheError {
        CacheError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl CacheClient for DisabledCacheClient {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(self.unavailable())
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(self.unavailable())
    }

    async fn delete(&self, _key: &str) -> Result<bool, CacheError> {
        Err(self.unavailable())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Err(self.unavailable())
    }
}
