//! Checkout handler.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use trolley_core::CartId;

use crate::error::ApiError;
use crate::state::AppState;

/// Checkout response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// The tracking record the cart was converted into.
    pub tracking_id: u64,
}

/// Check out a cart: validate it one final time, snapshot it into a
/// tracking record, and remove it from the active set.
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    Path(cart_id): Path<u64>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let tracking_id = state.store.checkout(CartId::new(cart_id))?;
    tracing::debug!(cart_id = %cart_id, tracking_id = %tracking_id, "checkout complete");
    Ok(Json(CheckoutResponse {
        tracking_id: tracking_id.value(),
    }))
}
