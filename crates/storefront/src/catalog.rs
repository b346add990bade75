//! Static product catalog.
//!
//! The catalog is fixed at startup and never mutated. It is small enough
//! that lookups are a linear scan.

use loja_core::{Price, ProductId};

use crate::models::Product;

/// Read-only list of purchasable products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from a list of products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products, in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            Product::new(1, "Camiseta", Price::from_cents(4990)),
            Product::new(2, "Calça Jeans", Price::from_cents(8990)),
            Product::new(3, "Tênis", Price::from_cents(14990)),
        ])
    }
}
