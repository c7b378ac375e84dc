//! HTTP request handlers.

pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod health;
