//! Catalog handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use trolley_core::Product;

use crate::state::AppState;

/// Product response.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Product id.
    pub product_id: u64,
    /// Product name.
    pub name: String,
    /// Units currently available.
    pub stock: u32,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.value(),
            name: product.name.clone(),
            stock: product.stock,
        }
    }
}

/// List all catalog products.
pub async fn list_products(State(state): State<Arc<AppState>>) -> Json<Vec<ProductResponse>> {
    let products = state
        .store
        .list_products()
        .iter()
        .map(ProductResponse::from)
        .collect();
    Json(products)
}
