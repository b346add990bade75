//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The session cookie is
//! signed with the configured secret and is the only identity signal the
//! storefront trusts.

use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::state::AppState;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "loja_session";

/// Create the session layer with an in-memory store.
///
/// The cookie expires after the configured max-age without activity, and is
/// marked `Secure` when the storefront is served over HTTPS.
#[must_use]
pub fn create_session_layer(state: &AppState) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let config = state.config();

    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(config.session_max_age_seconds),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(state.session_key().clone())
}
