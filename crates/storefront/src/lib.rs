//! Loja storefront library.
//!
//! Account registration and login, a fixed product catalog and a
//! per-user shopping cart, served as server-rendered HTML. Exposed as a
//! library so the router can be exercised from integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
