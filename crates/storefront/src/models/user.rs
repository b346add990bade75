//! User domain types.

use chrono::{DateTime, Utc};

use loja_core::Username;

/// A storefront account (domain type).
///
/// The password hash and cart are owned by the repository and exposed
/// through dedicated operations, never through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique username.
    pub username: Username,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}
