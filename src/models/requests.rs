//! Request DTOs for the product API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Maximum allowed product name length in characters
pub const MAX_NAME_LENGTH: usize = 256;

/// Request body for the update operation (PUT /products/:id)
///
/// Absent fields are left unchanged. An empty body `{}` is a valid no-op.
/// Other fields, such as `id` when a client sends back a product it read,
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductUpdate {
    /// New product name
    #[serde(default)]
    pub name: Option<String>,
    /// New product price
    #[serde(default)]
    pub price: Option<f64>,
}

impl ProductUpdate {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Some("Name cannot be empty".to_string());
            }
            if name.chars().count() > MAX_NAME_LENGTH {
                return Some(format!(
                    "Name exceeds maximum length of {} characters",
                    MAX_NAME_LENGTH
                ));
            }
        }
        if let Some(price) = self.price {
            if !price.is_finite() {
                return Some("Price must be a finite number".to_string());
            }
            if price < 0.0 {
                return Some("Price cannot be negative".to_string());
            }
        }
        None
    }
}
