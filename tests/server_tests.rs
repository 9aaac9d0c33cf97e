//! End-to-end tests over a real TCP socket.

use std::net::SocketAddr;

use product_cache_api::{api::create_router, models::Product, AppState, Config};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn spawn_server() -> SocketAddr {
    let app = create_router(AppState::in_memory(&Config::default()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn test_product_round_trip_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/products/1", addr);

    let product: Product = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(product, Product::new(1, "Laptop", 1000.0));

    let response = client
        .put(&url)
        .json(&json!({ "price": 899.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = response.json().await.unwrap();
    assert_eq!(updated.price, 899.5);

    // Give the background invalidation a moment to land
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let product: Product = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(product.price, 899.5);
}

#[tokio::test]
async fn test_status_codes_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/products/404", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .put(format!("http://{}/products/1", addr))
        .json(&json!({ "price": -5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}
