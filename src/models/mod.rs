//! Request and Response models for the product API
//!
//! This module defines the domain model and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::Product;
pub use requests::{ProductUpdate, MAX_NAME_LENGTH};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
