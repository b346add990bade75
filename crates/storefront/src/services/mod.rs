//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Account registration and password login
//! - `cart` - Per-user cart operations against the catalog

pub mod auth;
pub mod cart;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService, CartSummary};
