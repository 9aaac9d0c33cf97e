//! Store Module
//!
//! The authoritative product datastore behind the cache-aside layer.

mod memory;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Product, ProductUpdate};

pub use memory::InMemoryProductStore;

/// Source of truth for products.
#[async_trait]
pub trait ProductStore: Send + Sync + Debug {
    /// Fetches a product by id.
    async fn get(&self, id: u64) -> Result<Product, StoreError>;

    /// Validates and applies `update`, returning the stored result.
    async fn update(&self, id: u64, update: &ProductUpdate) -> Result<Product, StoreError>;
}
