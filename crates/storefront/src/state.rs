//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tower_sessions::cookie::Key;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::db::UserRepository;
use crate::services::{AuthService, CartService};

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid session secret: {0}")]
    SessionKey(#[from] tower_sessions::cookie::KeyError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the user repository and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    users: Arc<dyn UserRepository>,
    catalog: Catalog,
    session_key: Key,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `users` - User repository
    /// * `catalog` - Product catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the session secret cannot be used as a signing key.
    pub fn new(
        config: StorefrontConfig,
        users: Arc<dyn UserRepository>,
        catalog: Catalog,
    ) -> Result<Self, StateError> {
        let session_key = Key::try_from(config.session_secret.expose_secret().as_bytes())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                users,
                catalog,
                session_key,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the user repository.
    #[must_use]
    pub fn users(&self) -> &dyn UserRepository {
        self.inner.users.as_ref()
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the key used to sign session cookies.
    #[must_use]
    pub fn session_key(&self) -> &Key {
        &self.inner.session_key
    }

    /// Authentication service over this state's repository.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.users())
    }

    /// Cart service over this state's repository and catalog.
    #[must_use]
    pub fn cart(&self) -> CartService<'_> {
        CartService::new(self.users(), self.catalog())
    }
}
