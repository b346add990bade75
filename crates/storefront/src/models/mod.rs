//! Domain models for the storefront.
//!
//! These types represent validated domain objects. Storage-specific records
//! live in [`crate::db`].

pub mod product;
pub mod session;
pub mod user;

pub use product::Product;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
