//! Product model
//!
//! The unit stored in the product store and cached as JSON.

use serde::{Deserialize, Serialize};

use super::ProductUpdate;

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: f64,
}

impl Product {
    /// Creates a new Product
    pub fn new(id: u64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// Returns a copy with the update's present fields applied.
    ///
    /// Does not validate; callers check `ProductUpdate::validate` first.
    pub fn apply(&self, update: &ProductUpdate) -> Self {
        let mut updated = self.clone();
        if let Some(name) = &update.name {
            updated.name = name.clone();
        }
        if let Some(price) = update.price {
            updated.price = price;
        }
        updated
    }
}
