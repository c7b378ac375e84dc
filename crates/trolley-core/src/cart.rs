//! Cart and tracking-record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Constants
// ============================================================================

/// Maximum total units across all line items in a cart.
pub const MAX_TOTAL_QUANTITY: u32 = 15;

/// Maximum operations (appends and reads) a cart may accumulate.
/// Exceeding this is fatal to the cart, not just to the request.
pub const MAX_CART_OPERATIONS: u32 = 20;

/// Maximum aggregate units of any single product in a cart.
pub const MAX_PER_PRODUCT_QUANTITY: u32 = 10;

/// Maximum idle time before a cart is reclaimed on next access.
pub const INACTIVITY_LIMIT_SECS: i64 = 5 * 60;

use crate::ids::{CartId, ProductId, TrackingId};

/// A single product/quantity pair in a cart.
///
/// A cart may hold several line items for the same product; they are
/// kept as separate entries and never merged — only their aggregate
/// quantity is bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product this entry refers to.
    pub product_id: ProductId,
    /// Units of the product in this entry.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item.
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// A per-user, time-and-count-bounded collection of line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// The cart id, unique across the store's lifetime.
    pub cart_id: CartId,
    /// The owning user. At most one active cart per user.
    pub user_id: String,
    /// Line items in append order.
    pub items: Vec<LineItem>,
    /// Number of operations performed on this cart so far.
    pub operation_count: u32,
    /// When the cart was last touched. Drives inactivity eviction.
    pub last_modified: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart for a user.
    #[must_use]
    pub fn new(cart_id: CartId, user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            cart_id,
            user_id: user_id.to_string(),
            items: Vec::new(),
            operation_count: 0,
            last_modified: now,
        }
    }

    /// Total units across all line items.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Aggregate units per product, summing duplicate entries.
    #[must_use]
    pub fn per_product_totals(&self) -> BTreeMap<ProductId, u32> {
        let mut totals = BTreeMap::new();
        for item in &self.items {
            *totals.entry(item.product_id).or_insert(0) += item.quantity;
        }
        totals
    }

    /// Record an operation: bump the count and refresh the activity clock.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.operation_count += 1;
        self.last_modified = now;
    }

    /// Reset the cart to empty: clear items, zero the operation count,
    /// refresh the activity clock. Used by the overwrite operation.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.items.clear();
        self.operation_count = 0;
        self.last_modified = now;
    }
}

/// An immutable snapshot of a cart taken at checkout.
///
/// Tracking records live in their own id space, are created only by
/// checkout, and are never mutated or expired afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingRecord {
    /// The tracking id, independent of the cart id sequence.
    pub tracking_id: TrackingId,
    /// The cart as it was at checkout time.
    pub cart: Cart,
    /// When the checkout happened.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with_items(items: Vec<LineItem>) -> Cart {
        let mut cart = Cart::new(CartId::new(1), "user-1", Utc::now());
        cart.items = items;
        cart
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(CartId::new(1), "user-1", Utc::now());
        assert!(cart.items.is_empty());
        assert_eq!(cart.operation_count, 0);
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn total_quantity_sums_all_entries() {
        let cart = cart_with_items(vec![
            LineItem::new(ProductId::new(1), 3),
            LineItem::new(ProductId::new(2), 4),
            LineItem::new(ProductId::new(1), 2),
        ]);
        assert_eq!(cart.total_quantity(), 9);
    }

    #[test]
    fn per_product_totals_merge_duplicate_entries() {
        let cart = cart_with_items(vec![
            LineItem::new(ProductId::new(1), 3),
            LineItem::new(ProductId::new(2), 4),
            LineItem::new(ProductId::new(1), 2),
        ]);
        let totals = cart.per_product_totals();
        assert_eq!(totals[&ProductId::new(1)], 5);
        assert_eq!(totals[&ProductId::new(2)], 4);
        // Entries themselves stay separate.
        assert_eq!(cart.items.len(), 3);
    }

    #[test]
    fn touch_counts_and_refreshes() {
        let created = Utc::now();
        let mut cart = Cart::new(CartId::new(1), "user-1", created);
        let later = created + chrono::Duration::seconds(30);
        cart.touch(later);
        assert_eq!(cart.operation_count, 1);
        assert_eq!(cart.last_modified, later);
    }

    #[test]
    fn reset_clears_items_and_operations() {
        let mut cart = cart_with_items(vec![LineItem::new(ProductId::new(1), 3)]);
        cart.operation_count = 12;
        let now = Utc::now();
        cart.reset(now);
        assert!(cart.items.is_empty());
        assert_eq!(cart.operation_count, 0);
        assert_eq!(cart.last_modified, now);
    }
}
