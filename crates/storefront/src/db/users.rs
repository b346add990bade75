//! User repository.
//!
//! Each account row owns its password hash and its cart. Every operation
//! either applies completely or leaves the row untouched.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use loja_core::Username;

use super::RepositoryError;
use crate::models::{Product, User};

/// Storage operations for accounts and their carts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user with a password hash and an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError>;

    /// Get a user by username.
    ///
    /// # Errors
    ///
    /// Implementations backed by external storage may fail; the in-memory
    /// store never does.
    async fn get_by_username(&self, username: &Username) -> Result<Option<User>, RepositoryError>;

    /// Get a user together with their stored password hash.
    ///
    /// # Errors
    ///
    /// Implementations backed by external storage may fail; the in-memory
    /// store never does.
    async fn get_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError>;

    /// Get the user's cart, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    async fn cart(&self, username: &Username) -> Result<Vec<Product>, RepositoryError>;

    /// Append a product to the user's cart and return the new cart length.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    async fn push_cart_item(
        &self,
        username: &Username,
        product: Product,
    ) -> Result<usize, RepositoryError>;

    /// Remove every item from the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    async fn clear_cart(&self, username: &Username) -> Result<(), RepositoryError>;
}

/// Stored account row.
#[derive(Debug, Clone)]
struct UserRow {
    password_hash: String,
    created_at: DateTime<Utc>,
    cart: Vec<Product>,
}

impl UserRow {
    fn to_user(&self, username: &Username) -> User {
        User {
            username: username.clone(),
            created_at: self.created_at,
        }
    }
}

/// Process-local user repository.
///
/// All state is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<HashMap<Username, UserRow>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(username) {
            return Err(RepositoryError::Conflict(
                "username already exists".to_owned(),
            ));
        }

        let row = UserRow {
            password_hash: password_hash.to_owned(),
            created_at: Utc::now(),
            cart: Vec::new(),
        };
        let user = row.to_user(username);
        rows.insert(username.clone(), row);

        Ok(user)
    }

    async fn get_by_username(&self, username: &Username) -> Result<Option<User>, RepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows.get(username).map(|row| row.to_user(username)))
    }

    async fn get_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows
            .get(username)
            .map(|row| (row.to_user(username), row.password_hash.clone())))
    }

    async fn cart(&self, username: &Username) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.read().await;
        rows.get(username)
            .map(|row| row.cart.clone())
            .ok_or(RepositoryError::NotFound)
    }

    async fn push_cart_item(
        &self,
        username: &Username,
        product: Product,
    ) -> Result<usize, RepositoryError> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(username).ok_or(RepositoryError::NotFound)?;
        row.cart.push(product);
        Ok(row.cart.len())
    }

    async fn clear_cart(&self, username: &Username) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(username).ok_or(RepositoryError::NotFound)?;
        row.cart.clear();
        Ok(())
    }
}
