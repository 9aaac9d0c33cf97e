//! Background Tasks Module
//!
//! Contains the tasks that run detached from request handling.
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired entries from the in-memory cache
//! - Invalidation: Deletes a product's cache entry after a write

mod cleanup;
mod invalidation;

pub use cleanup::spawn_cleanup_task;
pub use invalidation::spawn_invalidation;
