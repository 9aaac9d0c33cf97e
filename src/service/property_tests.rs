//! Property-Based Tests for the Product Service
//!
//! Uses proptest to check cache transparency and fail-open behaviour over
//! arbitrary catalogues and update sequences.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use super::test_support::{wait_for_invalidation, CountingStore, RecordingCache};
use super::ProductService;
use crate::cache::product_cache_key;
use crate::models::{Product, ProductUpdate};

// == Strategies ==
fn product_strategy() -> impl Strategy<Value = Product> {
    (1u64..50, "[a-zA-Z][a-zA-Z0-9 ]{0,31}", 0u32..100_000)
        .prop_map(|(id, name, cents)| Product::new(id, name, cents as f64 / 100.0))
}

fn catalogue_strategy() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(product_strategy(), 1..10)
}

fn update_strategy() -> impl Strategy<Value = ProductUpdate> {
    (
        prop::option::of("[a-zA-Z][a-zA-Z0-9]{0,15}"),
        prop::option::of(0u32..100_000),
    )
        .prop_map(|(name, cents)| ProductUpdate {
            name,
            price: cents.map(|c| c as f64 / 100.0),
        })
}

fn service(products: Vec<Product>, cache: RecordingCache) -> (ProductService, Arc<RecordingCache>) {
    let store = Arc::new(CountingStore::new(products));
    let cache = Arc::new(cache);
    let service = ProductService::new(store, cache.clone(), Duration::from_secs(300));
    (service, cache)
}

/// The catalogue as the store will hold it: later duplicates win.
fn expected(products: &[Product], id: u64) -> Option<Product> {
    products.iter().rev().find(|p| p.id == id).cloned()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Reads return the store's data whether or not the cache holds an entry.
    #[test]
    fn prop_cache_transparency(products in catalogue_strategy(), probe in 1u64..60) {
        let (service, _cache) = service(products.clone(), RecordingCache::default());

        tokio_test::block_on(async {
            let cold = service.get_product(probe).await.ok();
            let warm = service.get_product(probe).await.ok();
            prop_assert_eq!(&cold, &expected(&products, probe));
            prop_assert_eq!(&warm, &cold);
            Ok::<(), TestCaseError>(())
        })?;
    }

    // With every cache call failing, reads and writes behave as if there were no cache.
    #[test]
    fn prop_fail_open(products in catalogue_strategy(), update in update_strategy()) {
        let (service, _cache) = service(products.clone(), RecordingCache::failing());
        let id = products[0].id;
        let before = expected(&products, id).unwrap();

        tokio_test::block_on(async {
            prop_assert_eq!(service.get_product(id).await.unwrap(), before.clone());
            let updated = service.update_product(id, &update).await.unwrap();
            prop_assert_eq!(&updated, &before.apply(&update));
            prop_assert_eq!(service.get_product(id).await.unwrap(), updated);
            Ok::<(), TestCaseError>(())
        })?;
    }

    // After a write and its invalidation, the next read sees the update.
    #[test]
    fn prop_read_after_write(
        products in catalogue_strategy(),
        updates in prop::collection::vec(update_strategy(), 1..5),
    ) {
        let (service, cache) = service(products.clone(), RecordingCache::default());
        let id = products[0].id;
        let key = product_cache_key(id);

        tokio_test::block_on(async {
            service.get_product(id).await.unwrap();
            for update in &updates {
                let current = service.update_product(id, update).await.unwrap();
                prop_assert!(wait_for_invalidation(&cache, &key).await);
                prop_assert_eq!(service.get_product(id).await.unwrap(), current.clone());
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
