//! Catalog and health integration tests.

mod common;

use common::TestHarness;

#[tokio::test]
async fn health_reports_ok() {
    let harness = TestHarness::new();

    let response = harness.server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "trolley");
}

#[tokio::test]
async fn catalog_starts_with_seventeen_products() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/products").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 17);
}

#[tokio::test]
async fn catalog_stock_levels_are_fixed_at_startup() {
    let harness = TestHarness::new();

    assert_eq!(harness.stock_of(1).await, 25);
    assert_eq!(harness.stock_of(2).await, 7);
    assert_eq!(harness.stock_of(15).await, 2);
    assert_eq!(harness.stock_of(17).await, 8);
}

#[tokio::test]
async fn fresh_store_has_no_carts() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/carts").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert!(body.as_array().unwrap().is_empty());
}
