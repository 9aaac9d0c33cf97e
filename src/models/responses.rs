//! Response DTOs for the product API
//!
//! Defines the structure of outgoing HTTP response bodies. Products are
//! returned as-is; see `models::Product`.

use serde::Serialize;

use crate::cache::StatsSnapshot;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that found no usable cache entry
    pub misses: u64,
    /// Reads that fell back to the store
    pub store_reads: u64,
    /// Cache operations that failed and were absorbed
    pub cache_errors: u64,
    /// Invalidations that completed
    pub invalidations: u64,
    /// Invalidations that failed
    pub invalidation_failures: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(stats: StatsSnapshot) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            store_reads: stats.store_reads,
            cache_errors: stats.cache_errors,
            invalidations: stats.invalidations,
            invalidation_failures: stats.invalidation_failures,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status, always "healthy" while the process serves requests
    pub status: String,
    /// Cache reachability ("up" or "down"); informational only
    pub cache: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache_up: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            cache: if cache_up { "up" } else { "down" }.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
