//! Common test utilities for trolley integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::json;

use trolley_service::{create_router, AppState, ServiceConfig};
use trolley_store::MemoryStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// A handle on the same store the server uses, for direct state
    /// setup (e.g. creating a cart with a backdated activity clock).
    pub store: Arc<MemoryStore>,
}

impl TestHarness {
    /// Create a new test harness with a fresh store and seed catalog.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(Arc::clone(&store), ServiceConfig::default());
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, store }
    }

    /// Create a cart over HTTP and return its id.
    pub async fn create_cart(&self, user_id: &str) -> u64 {
        let response = self
            .server
            .post("/v1/carts")
            .json(&json!({ "user_id": user_id }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        body["cart_id"].as_u64().expect("cart_id in response")
    }

    /// Read a product's current stock over HTTP.
    pub async fn stock_of(&self, product_id: u64) -> u64 {
        let response = self.server.get("/v1/products").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body.as_array()
            .expect("product array")
            .iter()
            .find(|p| p["product_id"].as_u64() == Some(product_id))
            .expect("product present")["stock"]
            .as_u64()
            .expect("stock field")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
