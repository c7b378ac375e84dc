//! In-memory state engine for trolley.
//!
//! This crate owns all mutable service state — the product catalog, the
//! active carts, and the post-checkout tracking records — behind a
//! single lock, and implements every boundary operation with the cart
//! lifecycle rules from `trolley-core`.
//!
//! # Eviction on access
//!
//! There is no background sweeper. Whenever an operation validates a
//! cart and the validator reports an evicting violation (operation
//! limit, inactivity), the store deletes the cart right there and the
//! operation returns the validation error. A subsequent lookup of that
//! cart id is a plain not-found.
//!
//! # Example
//!
//! ```
//! use trolley_core::{LineItem, ProductId};
//! use trolley_store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let cart = store.create_cart("user-1").unwrap();
//! let cart = store
//!     .add_items(cart.cart_id, &[LineItem::new(ProductId::new(1), 2)])
//!     .unwrap();
//! let tracking_id = store.checkout(cart.cart_id).unwrap();
//! assert!(store.get_tracking(tracking_id).is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod memory;

pub use memory::MemoryStore;
