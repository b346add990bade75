//! Loja Core - Shared types library.
//!
//! This crate provides the domain types used by the storefront:
//! - `storefront` - Public-facing e-commerce site (auth, catalog, cart)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no session handling.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and usernames

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
