//! API Handlers
//!
//! HTTP request handlers for each product API endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheClient, InMemoryCacheClient};
use crate::config::Config;
use crate::error::Result;
use crate::models::{HealthResponse, Product, ProductUpdate, StatsResponse};
use crate::service::ProductService;
use crate::store::{InMemoryProductStore, ProductStore};

/// Application state shared across all handlers.
///
/// Holds the product service, which owns the shared cache handle.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}

impl AppState {
    /// Creates a new AppState around a product service.
    pub fn new(products: ProductService) -> Self {
        Self { products }
    }

    /// Builds the service from its parts.
    pub fn from_parts(
        store: Arc<dyn ProductStore>,
        cache: Arc<dyn CacheClient>,
        config: &Config,
    ) -> Self {
        Self::new(ProductService::new(store, cache, config.cache_ttl()))
    }

    /// Seeded store with an in-memory cache, used for local runs and tests.
    pub fn in_memory(config: &Config) -> Self {
        Self::from_parts(
            Arc::new(InMemoryProductStore::seeded()),
            Arc::new(InMemoryCacheClient::new()),
            config,
        )
    }
}

/// Handler for GET /products/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Product>> {
    let product = state.products.get_product(id).await?;
    Ok(Json(product))
}

/// Handler for PUT /products/:id
///
/// Returns the updated product without waiting for cache invalidation.
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<Product>> {
    let product = state.products.update_product(id, &update).await?;
    Ok(Json(product))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.products.stats()))
}

/// Handler for GET /health
///
/// Always 200 while the process serves requests; cache state is informational.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache_up = state.products.cache().ping().await.is_ok();
    Json(HealthResponse::healthy(cache_up))
}
