//! Product domain type.

use serde::{Deserialize, Serialize};

use loja_core::{Price, ProductId};

/// A purchasable item.
///
/// Products are immutable. A cart holds its own copies, so later changes to
/// the catalog never reach items that were already added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(id: i32, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            price,
        }
    }
}
