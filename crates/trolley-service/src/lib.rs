//! Trolley HTTP API Service.
//!
//! This crate provides the HTTP API for the trolley shopping-cart
//! service, including:
//!
//! - Catalog listing
//! - Cart lifecycle (create, read, append, overwrite, delete)
//! - Checkout into tracking records
//!
//! All state is process memory only; the catalog and stores reset on
//! restart.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for the router

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
