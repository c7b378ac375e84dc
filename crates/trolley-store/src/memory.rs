//! The in-memory store implementation.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};

use trolley_core::{
    validate_cart, Cart, CartError, CartId, Catalog, LineItem, Product, ProductId, Result,
    TrackingId, TrackingRecord, Violation,
};

/// All mutable service state behind a single lock.
///
/// One lock over the whole store keeps the two compound operations
/// atomic: the duplicate-user check plus insert in [`MemoryStore::create_cart`],
/// and the per-pair validate-then-append step in [`MemoryStore::add_items`].
///
/// Every time-sensitive operation has a `*_at` variant taking an
/// explicit `now` (primarily for testing) and a wrapper that passes
/// `Utc::now()`.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    catalog: Catalog,
    carts: BTreeMap<CartId, Cart>,
    trackings: BTreeMap<TrackingId, TrackingRecord>,
    next_cart_id: u64,
    next_tracking_id: u64,
}

impl MemoryStore {
    /// Create a store with the fixed seed catalog and no carts.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Catalog::seed())
    }

    /// Create a store with a specific catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            inner: Mutex::new(Inner {
                catalog,
                carts: BTreeMap::new(),
                trackings: BTreeMap::new(),
                next_cart_id: 0,
                next_tracking_id: 0,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-operation; the state is
        // still structurally sound, so keep serving.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List all products in id order.
    #[must_use]
    pub fn list_products(&self) -> Vec<Product> {
        self.lock().catalog.iter().cloned().collect()
    }

    /// Look up a single product.
    #[must_use]
    pub fn get_product(&self, product_id: ProductId) -> Option<Product> {
        self.lock().catalog.get(product_id).cloned()
    }

    // =========================================================================
    // Carts
    // =========================================================================

    /// List all active carts. No validation runs; this is the raw
    /// debug/admin view and has no side effects.
    #[must_use]
    pub fn list_carts(&self) -> Vec<Cart> {
        self.lock().carts.values().cloned().collect()
    }

    /// Create a new empty cart for a user.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidInput` for an empty user id and
    /// `CartError::DuplicateCart` if the user already has an active cart.
    pub fn create_cart(&self, user_id: &str) -> Result<Cart> {
        self.create_cart_at(user_id, Utc::now())
    }

    /// [`Self::create_cart`] with an explicit clock (primarily for testing).
    ///
    /// # Errors
    ///
    /// See [`Self::create_cart`].
    pub fn create_cart_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<Cart> {
        self.lock().create_cart(user_id, now)
    }

    /// Fetch a cart by id, validating it first.
    ///
    /// A successful read counts as an operation: the cart's operation
    /// count is bumped and its activity clock refreshed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if absent, or the validation
    /// failure (after any eviction side effect) if invalid.
    pub fn get_cart(&self, cart_id: CartId) -> Result<Cart> {
        self.get_cart_at(cart_id, Utc::now())
    }

    /// [`Self::get_cart`] with an explicit clock (primarily for testing).
    ///
    /// # Errors
    ///
    /// See [`Self::get_cart`].
    pub fn get_cart_at(&self, cart_id: CartId, now: DateTime<Utc>) -> Result<Cart> {
        self.lock().get_cart(cart_id, now)
    }

    /// Append line items to a cart, one pair at a time in input order.
    ///
    /// Each pair is accepted only if the cart validates in its current,
    /// pre-append state and the pair itself fits the product's current
    /// stock. Accepted pairs take effect immediately (stock decrement
    /// included); the first failure stops processing and is returned,
    /// with earlier pairs left applied.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound`, `CartError::InvalidInput` for
    /// an empty list, or the validation failure that stopped processing.
    pub fn add_items(&self, cart_id: CartId, items: &[LineItem]) -> Result<Cart> {
        self.add_items_at(cart_id, items, Utc::now())
    }

    /// [`Self::add_items`] with an explicit clock (primarily for testing).
    ///
    /// # Errors
    ///
    /// See [`Self::add_items`].
    pub fn add_items_at(
        &self,
        cart_id: CartId,
        items: &[LineItem],
        now: DateTime<Utc>,
    ) -> Result<Cart> {
        self.lock().add_items(cart_id, items, now)
    }

    /// Reset a cart to empty: clear its items, zero its operation count,
    /// refresh its activity clock. Stock consumed by earlier appends is
    /// not restored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if absent.
    pub fn overwrite_cart(&self, cart_id: CartId) -> Result<Cart> {
        self.overwrite_cart_at(cart_id, Utc::now())
    }

    /// [`Self::overwrite_cart`] with an explicit clock (primarily for testing).
    ///
    /// # Errors
    ///
    /// See [`Self::overwrite_cart`].
    pub fn overwrite_cart_at(&self, cart_id: CartId, now: DateTime<Utc>) -> Result<Cart> {
        self.lock().overwrite_cart(cart_id, now)
    }

    /// Delete a cart explicitly.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if absent.
    pub fn delete_cart(&self, cart_id: CartId) -> Result<()> {
        let mut inner = self.lock();
        if inner.carts.remove(&cart_id).is_none() {
            return Err(CartError::CartNotFound { cart_id });
        }
        tracing::info!(cart_id = %cart_id, "cart deleted");
        Ok(())
    }

    // =========================================================================
    // Checkout / tracking
    // =========================================================================

    /// Convert a valid cart into a tracking record.
    ///
    /// The cart is validated once more; if valid, a tracking id is
    /// allocated (its own sequence, independent of cart ids), the cart
    /// is snapshotted under it, and the cart is removed from the active
    /// set. Stock consumed by the cart stays consumed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if absent, or the validation
    /// failure (after any eviction side effect) if invalid.
    pub fn checkout(&self, cart_id: CartId) -> Result<TrackingId> {
        self.checkout_at(cart_id, Utc::now())
    }

    /// [`Self::checkout`] with an explicit clock (primarily for testing).
    ///
    /// # Errors
    ///
    /// See [`Self::checkout`].
    pub fn checkout_at(&self, cart_id: CartId, now: DateTime<Utc>) -> Result<TrackingId> {
        self.lock().checkout(cart_id, now)
    }

    /// Fetch a tracking record by id.
    ///
    /// # Errors
    ///
    /// Returns `CartError::TrackingNotFound` if absent.
    pub fn get_tracking(&self, tracking_id: TrackingId) -> Result<TrackingRecord> {
        self.lock()
            .trackings
            .get(&tracking_id)
            .cloned()
            .ok_or(CartError::TrackingNotFound { tracking_id })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    /// Validate a cart, deleting it if the violation is evicting.
    fn validate(&mut self, cart_id: CartId, now: DateTime<Utc>) -> Result<()> {
        let Some(cart) = self.carts.get(&cart_id) else {
            return Err(CartError::CartNotFound { cart_id });
        };

        if let Err(violation) = validate_cart(cart, &self.catalog, now) {
            if violation.evicts() {
                self.carts.remove(&cart_id);
                tracing::info!(cart_id = %cart_id, reason = %violation, "cart evicted");
            }
            return Err(violation.into());
        }

        Ok(())
    }

    fn create_cart(&mut self, user_id: &str, now: DateTime<Utc>) -> Result<Cart> {
        if user_id.is_empty() {
            return Err(CartError::InvalidInput("user_id is required".into()));
        }

        if self.carts.values().any(|cart| cart.user_id == user_id) {
            return Err(CartError::DuplicateCart {
                user_id: user_id.to_string(),
            });
        }

        self.next_cart_id += 1;
        let cart_id = CartId::new(self.next_cart_id);
        let cart = Cart::new(cart_id, user_id, now);
        self.carts.insert(cart_id, cart.clone());

        tracing::info!(cart_id = %cart_id, user_id = %user_id, "cart created");
        Ok(cart)
    }

    fn get_cart(&mut self, cart_id: CartId, now: DateTime<Utc>) -> Result<Cart> {
        self.validate(cart_id, now)?;

        let Some(cart) = self.carts.get_mut(&cart_id) else {
            return Err(CartError::CartNotFound { cart_id });
        };
        cart.touch(now);
        Ok(cart.clone())
    }

    fn add_items(&mut self, cart_id: CartId, items: &[LineItem], now: DateTime<Utc>) -> Result<Cart> {
        if items.is_empty() {
            return Err(CartError::InvalidInput("item list must not be empty".into()));
        }
        if !self.carts.contains_key(&cart_id) {
            return Err(CartError::CartNotFound { cart_id });
        }

        for item in items {
            // Full validation of the pre-append state. May evict.
            self.validate(cart_id, now)?;

            // The candidate pair must fit current stock before the
            // decrement; the pre-append validation only covers entries
            // already in the cart.
            match self.catalog.get(item.product_id) {
                Some(product) if item.quantity <= product.stock => {}
                _ => return Err(Violation::InsufficientStock.into()),
            }

            let Some(cart) = self.carts.get_mut(&cart_id) else {
                return Err(CartError::CartNotFound { cart_id });
            };
            cart.items.push(item.clone());
            cart.touch(now);
            self.catalog.decrement_stock(item.product_id, item.quantity);
        }

        let Some(cart) = self.carts.get(&cart_id) else {
            return Err(CartError::CartNotFound { cart_id });
        };
        Ok(cart.clone())
    }

    fn overwrite_cart(&mut self, cart_id: CartId, now: DateTime<Utc>) -> Result<Cart> {
        let Some(cart) = self.carts.get_mut(&cart_id) else {
            return Err(CartError::CartNotFound { cart_id });
        };
        cart.reset(now);
        tracing::info!(cart_id = %cart_id, "cart overwritten");
        Ok(cart.clone())
    }

    fn checkout(&mut self, cart_id: CartId, now: DateTime<Utc>) -> Result<TrackingId> {
        self.validate(cart_id, now)?;

        let Some(cart) = self.carts.remove(&cart_id) else {
            return Err(CartError::CartNotFound { cart_id });
        };

        self.next_tracking_id += 1;
        let tracking_id = TrackingId::new(self.next_tracking_id);
        self.trackings.insert(
            tracking_id,
            TrackingRecord {
                tracking_id,
                cart,
                created_at: now,
            },
        );

        tracing::info!(cart_id = %cart_id, tracking_id = %tracking_id, "cart checked out");
        Ok(tracking_id)
    }
}
