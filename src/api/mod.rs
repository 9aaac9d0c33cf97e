//! API Module
//!
//! HTTP handlers and routing for the product REST API.
//!
//! # Endpoints
//! - `GET /products/:id` - Fetch a product, cache first
//! - `PUT /products/:id` - Update a product and invalidate its cache entry
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
