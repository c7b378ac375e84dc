//! Cart validation.
//!
//! Every read or mutation of a cart passes through [`validate_cart`]
//! first. The five checks run in a fixed order and short-circuit on the
//! first failure, so the reported reason is deterministic: an over-long
//! cart that is also stale reports "too many items", not "inactivity
//! timeout".
//!
//! The validator itself is pure. Two of the violations
//! ([`Violation::OperationLimitExceeded`] and
//! [`Violation::InactivityTimeout`]) are *evicting*: the store reclaims
//! the cart when a validation it runs reports one of them. This is lazy
//! expiry — a stale or abusive cart is deleted the moment anything
//! touches it, with no background sweeper.

use chrono::{DateTime, Duration, Utc};

use crate::cart::{
    Cart, INACTIVITY_LIMIT_SECS, MAX_CART_OPERATIONS, MAX_PER_PRODUCT_QUANTITY,
    MAX_TOTAL_QUANTITY,
};
use crate::catalog::Catalog;

/// A failed cart validation, carrying the reason reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// Total units across all entries exceed [`MAX_TOTAL_QUANTITY`].
    #[error("too many items")]
    TooManyItems,

    /// The cart has accumulated more than [`MAX_CART_OPERATIONS`]
    /// operations. Evicting: the cart is deleted, not just refused.
    #[error("operation limit exceeded")]
    OperationLimitExceeded,

    /// Some product's aggregate quantity exceeds
    /// [`MAX_PER_PRODUCT_QUANTITY`], summing duplicate entries.
    #[error("quantity limit per product exceeded")]
    QuantityLimitExceeded,

    /// Some entry refers to a missing product or asks for more units
    /// than the catalog currently has.
    #[error("insufficient stock")]
    InsufficientStock,

    /// The cart has been idle longer than [`INACTIVITY_LIMIT_SECS`].
    /// Evicting: the cart is deleted, not just refused.
    #[error("inactivity timeout")]
    InactivityTimeout,
}

impl Violation {
    /// Whether this violation reclaims the cart as a side effect.
    #[must_use]
    pub const fn evicts(self) -> bool {
        matches!(self, Self::OperationLimitExceeded | Self::InactivityTimeout)
    }
}

/// Run the five-step validity check on a cart.
///
/// Checks, in order, short-circuiting on the first failure:
///
/// 1. total quantity over the cart limit
/// 2. operation count over the operation limit (evicting)
/// 3. aggregate per-product quantity over the per-product limit
/// 4. any entry's quantity over the product's current stock, or the
///    product missing from the catalog
/// 5. idle longer than the inactivity limit (evicting)
///
/// # Errors
///
/// Returns the first [`Violation`] encountered.
pub fn validate_cart(cart: &Cart, catalog: &Catalog, now: DateTime<Utc>) -> Result<(), Violation> {
    if cart.total_quantity() > MAX_TOTAL_QUANTITY {
        return Err(Violation::TooManyItems);
    }

    if cart.operation_count > MAX_CART_OPERATIONS {
        return Err(Violation::OperationLimitExceeded);
    }

    let mut totals = std::collections::BTreeMap::new();
    for item in &cart.items {
        let total = totals.entry(item.product_id).or_insert(0u32);
        *total += item.quantity;
        if *total > MAX_PER_PRODUCT_QUANTITY {
            return Err(Violation::QuantityLimitExceeded);
        }
    }

    for item in &cart.items {
        match catalog.get(item.product_id) {
            Some(product) if item.quantity <= product.stock => {}
            _ => return Err(Violation::InsufficientStock),
        }
    }

    if now - cart.last_modified > Duration::seconds(INACTIVITY_LIMIT_SECS) {
        return Err(Violation::InactivityTimeout);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::ids::{CartId, ProductId};

    fn fresh_cart(now: DateTime<Utc>) -> Cart {
        Cart::new(CartId::new(1), "user-1", now)
    }

    #[test]
    fn empty_cart_is_valid() {
        let now = Utc::now();
        let cart = fresh_cart(now);
        assert_eq!(validate_cart(&cart, &Catalog::seed(), now), Ok(()));
    }

    #[test]
    fn too_many_items_rejected() {
        let now = Utc::now();
        let mut cart = fresh_cart(now);
        // 16 units spread over two products, each within its own limits.
        cart.items = vec![
            LineItem::new(ProductId::new(1), 8),
            LineItem::new(ProductId::new(3), 8),
        ];
        assert_eq!(
            validate_cart(&cart, &Catalog::seed(), now),
            Err(Violation::TooManyItems)
        );
    }

    #[test]
    fn exactly_fifteen_units_is_still_valid() {
        let now = Utc::now();
        let mut cart = fresh_cart(now);
        cart.items = vec![
            LineItem::new(ProductId::new(1), 8),
            LineItem::new(ProductId::new(3), 7),
        ];
        assert_eq!(validate_cart(&cart, &Catalog::seed(), now), Ok(()));
    }

    #[test]
    fn operation_limit_exceeded_is_evicting() {
        let now = Utc::now();
        let mut cart = fresh_cart(now);
        cart.operation_count = 21;
        let violation = validate_cart(&cart, &Catalog::seed(), now).unwrap_err();
        assert_eq!(violation, Violation::OperationLimitExceeded);
        assert!(violation.evicts());
    }

    #[test]
    fn twenty_operations_is_still_valid() {
        let now = Utc::now();
        let mut cart = fresh_cart(now);
        cart.operation_count = 20;
        assert_eq!(validate_cart(&cart, &Catalog::seed(), now), Ok(()));
    }

    #[test]
    fn per_product_limit_sums_duplicate_entries() {
        let now = Utc::now();
        let mut cart = fresh_cart(now);
        // 11 units of product 1 across two entries; total stays under 15.
        cart.items = vec![
            LineItem::new(ProductId::new(1), 6),
            LineItem::new(ProductId::new(1), 5),
        ];
        assert_eq!(
            validate_cart(&cart, &Catalog::seed(), now),
            Err(Violation::QuantityLimitExceeded)
        );
    }

    #[test]
    fn entry_over_stock_is_insufficient() {
        let now = Utc::now();
        let mut cart = fresh_cart(now);
        // Product 15 has stock 2.
        cart.items = vec![LineItem::new(ProductId::new(15), 3)];
        assert_eq!(
            validate_cart(&cart, &Catalog::seed(), now),
            Err(Violation::InsufficientStock)
        );
    }

    #[test]
    fn unknown_product_is_insufficient_stock() {
        let now = Utc::now();
        let mut cart = fresh_cart(now);
        cart.items = vec![LineItem::new(ProductId::new(99), 1)];
        assert_eq!(
            validate_cart(&cart, &Catalog::seed(), now),
            Err(Violation::InsufficientStock)
        );
    }

    #[test]
    fn stale_cart_times_out_and_evicts() {
        let created = Utc::now();
        let cart = fresh_cart(created);
        let later = created + Duration::seconds(INACTIVITY_LIMIT_SECS + 1);
        let violation = validate_cart(&cart, &Catalog::seed(), later).unwrap_err();
        assert_eq!(violation, Violation::InactivityTimeout);
        assert!(violation.evicts());
    }

    #[test]
    fn exactly_five_minutes_idle_is_still_valid() {
        let created = Utc::now();
        let cart = fresh_cart(created);
        let later = created + Duration::seconds(INACTIVITY_LIMIT_SECS);
        assert_eq!(validate_cart(&cart, &Catalog::seed(), later), Ok(()));
    }

    #[test]
    fn check_order_count_beats_staleness() {
        let created = Utc::now();
        let mut cart = fresh_cart(created);
        cart.items = vec![
            LineItem::new(ProductId::new(1), 8),
            LineItem::new(ProductId::new(3), 8),
        ];
        let later = created + Duration::seconds(INACTIVITY_LIMIT_SECS + 60);
        // Both over-long and stale: the item-count check runs first.
        assert_eq!(
            validate_cart(&cart, &Catalog::seed(), later),
            Err(Violation::TooManyItems)
        );
    }

    #[test]
    fn check_order_operations_beat_per_product_limit() {
        let now = Utc::now();
        let mut cart = fresh_cart(now);
        cart.operation_count = 25;
        cart.items = vec![LineItem::new(ProductId::new(1), 11)];
        assert_eq!(
            validate_cart(&cart, &Catalog::seed(), now),
            Err(Violation::OperationLimitExceeded)
        );
    }

    #[test]
    fn non_evicting_violations_do_not_evict() {
        assert!(!Violation::TooManyItems.evicts());
        assert!(!Violation::QuantityLimitExceeded.evicts());
        assert!(!Violation::InsufficientStock.evicts());
    }
}
