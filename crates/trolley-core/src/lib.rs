//! Core types and validation rules for trolley.
//!
//! This crate provides the foundational types used throughout the trolley
//! shopping-cart service:
//!
//! - **Identifiers**: `CartId`, `TrackingId`, `ProductId`
//! - **Catalog**: `Product`, `Catalog`
//! - **Carts**: `Cart`, `LineItem`, `TrackingRecord`
//! - **Validation**: `validate_cart`, `Violation`
//!
//! # Cart lifecycle
//!
//! A cart is bounded four ways: at most 15 total units, at most 20
//! operations, at most 10 units of any single product, and at most 5
//! minutes of inactivity. Crossing the operation or inactivity bound is
//! fatal to the cart (it is reclaimed on the next access); the other
//! bounds reject the offending mutation and leave the cart alive.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod validate;

pub use cart::{
    Cart, LineItem, TrackingRecord, INACTIVITY_LIMIT_SECS, MAX_CART_OPERATIONS,
    MAX_PER_PRODUCT_QUANTITY, MAX_TOTAL_QUANTITY,
};
pub use catalog::{Catalog, Product};
pub use error::{CartError, Result};
pub use ids::{CartId, ProductId, TrackingId};
pub use validate::{validate_cart, Violation};
