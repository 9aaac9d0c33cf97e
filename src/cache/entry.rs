//! Cache Entry Module
//!
//! Defines the structure for individual in-memory cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value with its expiry deadline.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Expiration instant
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that expires after `ttl`.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal
    /// to its deadline.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
