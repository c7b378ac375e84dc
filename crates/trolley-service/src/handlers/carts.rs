//! Cart lifecycle handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use trolley_core::{Cart, CartId, LineItem, ProductId};

use crate::error::ApiError;
use crate::state::AppState;

/// Cart response.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    /// Cart id.
    pub cart_id: u64,
    /// Owning user.
    pub user_id: String,
    /// Line items in append order.
    pub items: Vec<ItemResponse>,
    /// Operations performed so far.
    pub operation_count: u32,
    /// Last activity timestamp (RFC 3339).
    pub last_modified: String,
}

/// A line item in a cart response.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    /// Product id.
    pub product_id: u64,
    /// Units of the product.
    pub quantity: u32,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            cart_id: cart.cart_id.value(),
            user_id: cart.user_id.clone(),
            items: cart
                .items
                .iter()
                .map(|item| ItemResponse {
                    product_id: item.product_id.value(),
                    quantity: item.quantity,
                })
                .collect(),
            operation_count: cart.operation_count,
            last_modified: cart.last_modified.to_rfc3339(),
        }
    }
}

/// Create cart request.
#[derive(Debug, Deserialize)]
pub struct CreateCartRequest {
    /// The user the cart belongs to.
    pub user_id: String,
}

/// Add items request.
#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    /// Ordered list of product/quantity pairs to append.
    pub items: Vec<ItemInput>,
}

/// A product/quantity pair in an add-items request.
#[derive(Debug, Deserialize)]
pub struct ItemInput {
    /// Product id.
    pub product_id: u64,
    /// Units to add.
    pub quantity: u32,
}

/// Delete confirmation response.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Confirmation message.
    pub message: String,
}

/// List all active carts (debug/admin view, no validation side effects).
pub async fn list_carts(State(state): State<Arc<AppState>>) -> Json<Vec<CartResponse>> {
    let carts = state
        .store
        .list_carts()
        .iter()
        .map(CartResponse::from)
        .collect();
    Json(carts)
}

/// Create a new cart for a user.
pub async fn create_cart(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateCartRequest>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let cart = state.store.create_cart(&body.user_id)?;
    tracing::debug!(cart_id = %cart.cart_id, user_id = %cart.user_id, "cart created");
    Ok((StatusCode::CREATED, Json(CartResponse::from(&cart))))
}

/// Fetch a cart by id. Runs the full validity check first; a stale or
/// over-operated cart is evicted here and reported as the error.
pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    Path(cart_id): Path<u64>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.store.get_cart(CartId::new(cart_id))?;
    Ok(Json(CartResponse::from(&cart)))
}

/// Append items to a cart. Pairs are applied one at a time; on failure
/// the pairs accepted before the failing one stay applied and the
/// response carries the failure reason.
pub async fn add_items(
    State(state): State<Arc<AppState>>,
    Path(cart_id): Path<u64>,
    Json(body): Json<AddItemsRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let items: Vec<LineItem> = body
        .items
        .iter()
        .map(|item| LineItem::new(ProductId::new(item.product_id), item.quantity))
        .collect();

    let cart = state.store.add_items(CartId::new(cart_id), &items)?;
    Ok(Json(CartResponse::from(&cart)))
}

/// Overwrite a cart: reset it to empty with a fresh operation budget.
pub async fn overwrite_cart(
    State(state): State<Arc<AppState>>,
    Path(cart_id): Path<u64>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.store.overwrite_cart(CartId::new(cart_id))?;
    Ok(Json(CartResponse::from(&cart)))
}

/// Delete a cart explicitly.
pub async fn delete_cart(
    State(state): State<Arc<AppState>>,
    Path(cart_id): Path<u64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.store.delete_cart(CartId::new(cart_id))?;
    Ok(Json(DeleteResponse {
        message: "cart deleted".to_string(),
    }))
}
