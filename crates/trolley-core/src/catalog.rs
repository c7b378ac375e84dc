//! Product catalog types.
//!
//! The catalog is a fixed in-memory set of products established at
//! initialization. Products are never added or removed at runtime; the
//! only mutation is a stock decrement when an append is accepted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// The product id, unique and immutable.
    pub id: ProductId,
    /// Human-readable product name.
    pub name: String,
    /// Units currently available.
    pub stock: u32,
}

impl Product {
    /// Create a product with an initial stock level.
    #[must_use]
    pub fn new(id: u64, name: &str, stock: u32) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_string(),
            stock,
        }
    }
}

/// The product catalog, keyed by product id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// The fixed seed catalog the service starts with.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(vec![
            Product::new(1, "Shirt", 25),
            Product::new(2, "Pants", 7),
            Product::new(3, "Shoes", 15),
            Product::new(4, "Hat", 5),
            Product::new(5, "Jacket", 8),
            Product::new(6, "Scarf", 12),
            Product::new(7, "Gloves", 6),
            Product::new(8, "Socks", 9),
            Product::new(9, "Cap", 4),
            Product::new(10, "Belt", 11),
            Product::new(11, "Sunglasses", 7),
            Product::new(12, "Watch", 3),
            Product::new(13, "Backpack", 6),
            Product::new(14, "Wallet", 10),
            Product::new(15, "Ring", 2),
            Product::new(16, "Necklace", 5),
            Product::new(17, "Bracelet", 8),
        ])
    }

    /// Look up a product by id. Read-only, no side effects.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.products.get(&product_id)
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate over all products in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Subtract `quantity` from a product's stock.
    ///
    /// The caller must already have validated `quantity <= stock`;
    /// calling this without that check is a logic error. An unknown
    /// product id is ignored.
    pub fn decrement_stock(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(product) = self.products.get_mut(&product_id) {
            debug_assert!(
                quantity <= product.stock,
                "stock decrement for product {product_id} would go below zero"
            );
            product.stock = product.stock.saturating_sub(quantity);
        }
    }
}
