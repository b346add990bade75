//! Cart service.
//!
//! Cart operations are scoped to one authenticated user. Items are copied
//! from the catalog when added.

use thiserror::Error;

use loja_core::{Price, ProductId, Username};

use crate::catalog::Catalog;
use crate::db::{RepositoryError, UserRepository};
use crate::models::Product;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No catalog product has the requested ID.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// The session refers to an account that no longer exists.
    #[error("unknown user")]
    UnknownUser,

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CartError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::UnknownUser,
            other => Self::Repository(other),
        }
    }
}

/// Cart contents with their running total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    /// Items in insertion order.
    pub items: Vec<Product>,
    /// Sum of item prices.
    pub total: Price,
}

impl CartSummary {
    /// Build a summary, computing the total from the items.
    #[must_use]
    pub fn new(items: Vec<Product>) -> Self {
        let total = items.iter().map(|item| item.price).sum();
        Self { items, total }
    }

    /// Number of items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart service.
pub struct CartService<'a> {
    users: &'a dyn UserRepository,
    catalog: &'a Catalog,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(users: &'a dyn UserRepository, catalog: &'a Catalog) -> Self {
        Self { users, catalog }
    }

    /// Append a copy of a catalog product to the user's cart.
    ///
    /// Returns the product that was added.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product isn't in the catalog;
    /// the cart is left unchanged.
    /// Returns `CartError::UnknownUser` if the user doesn't exist.
    pub async fn add(
        &self,
        username: &Username,
        product_id: ProductId,
    ) -> Result<Product, CartError> {
        let product = self
            .catalog
            .find(product_id)
            .cloned()
            .ok_or(CartError::ProductNotFound(product_id))?;

        let len = self.users.push_cart_item(username, product.clone()).await?;
        tracing::debug!(%username, product_id = %product.id, cart_len = len, "added to cart");

        Ok(product)
    }

    /// Get the user's cart and its total.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownUser` if the user doesn't exist.
    pub async fn view(&self, username: &Username) -> Result<CartSummary, CartError> {
        let items = self.users.cart(username).await?;
        Ok(CartSummary::new(items))
    }

    /// Remove every item from the user's cart. Emptying an empty cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownUser` if the user doesn't exist.
    pub async fn empty(&self, username: &Username) -> Result<(), CartError> {
        self.users.clear_cart(username).await?;
        tracing::debug!(%username, "cart emptied");
        Ok(())
    }
}
