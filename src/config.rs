//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which cache client the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// External Redis server at `redis_url`
    Redis,
    /// Process-local TTL map, useful for development without Redis
    Memory,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "in-memory" => Ok(CacheBackend::Memory),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Cache client implementation
    pub cache_backend: CacheBackend,
    /// Redis connection URL
    pub redis_url: String,
    /// TTL in seconds for cached products
    pub cache_ttl: u64,
    /// Upper bound for a single cache operation, in milliseconds
    pub cache_timeout_ms: u64,
    /// In-memory cache sweep interval in seconds
    pub cleanup_interval: u64,
    /// Simulated latency of the product store in milliseconds
    pub store_latency_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `REDIS_URL` - Redis address (default: redis://127.0.0.1:6379)
    /// - `CACHE_TTL` - Cached product TTL in seconds (default: 300)
    /// - `CACHE_TIMEOUT_MS` - Per-operation cache timeout (default: 250)
    /// - `CLEANUP_INTERVAL` - In-memory sweep frequency in seconds (default: 1)
    /// - `STORE_LATENCY_MS` - Simulated store latency (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_env("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_backend: parse_env("CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            cache_ttl: parse_env("CACHE_TTL")
                .filter(|ttl| *ttl > 0)
                .unwrap_or(defaults.cache_ttl),
            cache_timeout_ms: parse_env("CACHE_TIMEOUT_MS")
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.cache_timeout_ms),
            cleanup_interval: parse_env("CLEANUP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            store_latency_ms: parse_env("STORE_LATENCY_MS").unwrap_or(defaults.store_latency_ms),
        }
    }

    /// Cached product TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Cache operation timeout as a Duration.
    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_backend: CacheBackend::Redis,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            cache_ttl: 300,
            cache_timeout_ms: 250,
            cleanup_interval: 1,
            store_latency_ms: 0,
        }
    }
}
