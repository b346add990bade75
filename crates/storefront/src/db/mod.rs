//! Storage for storefront accounts and carts.
//!
//! # Store: in-process memory
//!
//! Accounts and carts live only as long as the process. Handlers and
//! services talk to the [`UserRepository`] trait, never to a concrete store,
//! so a database-backed implementation can replace
//! [`InMemoryUserRepository`] without touching them.
//!
//! ## Tables
//!
//! - `users` - username -> password hash, registration time, cart

pub mod users;

use thiserror::Error;

pub use users::{InMemoryUserRepository, UserRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}
