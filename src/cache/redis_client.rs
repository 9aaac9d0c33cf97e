//! Redis cache client
//!
//! One `ConnectionManager` is opened at startup and cloned per call; clones
//! share the same multiplexed connection and reconnect on their own. Every
//! operation is bounded by a timeout so a degraded server cannot stall reads.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult};
use tracing::info;

use crate::cache::CacheClient;
use crate::error::CacheError;

/// Configuration for the Redis cache client
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Upper bound for a single get/set/delete/ping
    pub operation_timeout: Duration,
    /// Upper bound for establishing the initial connection
    pub connection_timeout: Duration,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            operation_timeout: Duration::from_millis(250),
            connection_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisCacheConfig {
    /// Creates a new configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the per-operation timeout
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Sets the connection timeout
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }
}

#[derive(Clone)]
pub struct RedisCacheClient {
    connection: ConnectionManager,
    config: RedisCacheConfig,
}

impl fmt::Debug for RedisCacheClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCacheClient")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisCacheClient {
    /// Opens the shared connection and verifies it with a PING.
    pub async fn connect(config: RedisCacheConfig) -> Result<Self, CacheError> {
        let client = Client::open(config.url.as_str()).map_err(|e| {
            CacheError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let connection = tokio::time::timeout(
            config.connection_timeout,
            ConnectionManager::new(client),
        )
        .await
        .map_err(|_| CacheError::Timeout(config.connection_timeout.as_millis() as u64))?
        .map_err(|e| CacheError::Unavailable(format!("Failed to connect to Redis: {}", e)))?;

        let cache = Self { connection, config };
        cache.ping().await?;
        info!("Connected to Redis at {}", cache.config.url);
        Ok(cache)
    }
}

/// Runs one Redis call under `timeout`, mapping both failure modes to `CacheError`.
async fn bounded<T, F>(timeout: Duration, op: &str, key: &str, fut: F) -> Result<T, CacheError>
where
    F: Future<Output = RedisResult<T>> + Send,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(CacheError::Unavailable(format!(
            "Failed to {} key '{}': {}",
            op, key, e
        ))),
        Err(_) => Err(CacheError::Timeout(timeout.as_millis() as u64)),
    }
}

#[async_trait]
impl CacheClient for RedisCacheClient {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection.clone();
        bounded(self.config.operation_timeout, "get", key, async move {
            conn.get(key).await
        })
        .await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        let ttl_secs = ttl.as_secs().max(1);
        bounded(self.config.operation_timeout, "set", key, async move {
            conn.set_ex::<_, _, ()>(key, value, ttl_secs).await
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.connection.clone();
        let deleted: i64 = bounded(self.config.operation_timeout, "delete", key, async move {
            conn.del(key).await
        })
        .await?;
        Ok(deleted > 0)
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        let _: String = bounded(self.config.operation_timeout, "ping", "-", async move {
            redis::cmd("PING").query_async(&mut conn).await
        })
        .await?;
        Ok(())
    }
}
