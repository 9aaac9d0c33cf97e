//! Product Cache API - product read/update service with a cache-aside layer
//!
//! Reads are served from Redis when possible and fall back to the store;
//! writes go to the store and invalidate the cached entry in the background.
//! Cache failures never fail a request.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::ProductService;
