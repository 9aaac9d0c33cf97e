//! In-memory product store
//!
//! A HashMap guarded by an async RwLock, optionally delaying every call to
//! stand in for datastore round-trips.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::models::{Product, ProductUpdate};
use crate::store::ProductStore;

// == In-Memory Product Store ==
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<HashMap<u64, Product>>,
    latency: Duration,
}

impl InMemoryProductStore {
    // == Constructor ==
    /// Creates a store holding the given products.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: RwLock::new(products.into_iter().map(|p| (p.id, p)).collect()),
            latency: Duration::ZERO,
        }
    }

    /// Creates a store with the demo catalogue.
    pub fn seeded() -> Self {
        Self::new([
            Product::new(1, "Laptop", 1000.0),
            Product::new(2, "Smartphone", 500.0),
            Product::new(3, "Headphones", 100.0),
        ])
    }

    /// Delays every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn get(&self, id: u64) -> Result<Product, StoreError> {
        self.simulate_latency().await;
        debug!(id, "store read");
        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: u64, update: &ProductUpdate) -> Result<Product, StoreError> {
        if let Some(error_msg) = update.validate() {
            return Err(StoreError::Validation(error_msg));
        }

        self.simulate_latency().await;

        // Read-modify-write under one lock so concurrent updates do not interleave
        let mut products = self.products.write().await;
        let existing = products.get(&id).ok_or(StoreError::NotFound(id))?;
        let updated = existing.apply(update);
        products.insert(id, updated.clone());
        debug!(id, "store update");

        Ok(updated)
    }
}
