//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{carts, catalog, checkout, health};
use crate::state::AppState;

/// Maximum concurrent requests for the API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Catalog
/// - `GET /v1/products` - List catalog products
///
/// ## Carts
/// - `GET /v1/carts` - List all active carts (debug/admin)
/// - `POST /v1/carts` - Create a cart for a user
/// - `GET /v1/carts/:cart_id` - Fetch a cart (validates first)
/// - `PATCH /v1/carts/:cart_id` - Append items
/// - `PUT /v1/carts/:cart_id` - Overwrite (reset to empty)
/// - `DELETE /v1/carts/:cart_id` - Delete a cart
///
/// ## Checkout
/// - `POST /v1/carts/:cart_id/checkout` - Convert into a tracking record
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let api_routes = Router::new()
        // Catalog
        .route("/products", get(catalog::list_products))
        // Carts
        .route("/carts", get(carts::list_carts))
        .route("/carts", post(carts::create_cart))
        .route("/carts/:cart_id", get(carts::get_cart))
        .route("/carts/:cart_id", patch(carts::add_items))
        .route("/carts/:cart_id", put(carts::overwrite_cart))
        .route("/carts/:cart_id", delete(carts::delete_cart))
        // Checkout
        .route("/carts/:cart_id/checkout", post(checkout::checkout))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no concurrency limit)
        .route("/health", get(health::health))
        // API v1 routes
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
