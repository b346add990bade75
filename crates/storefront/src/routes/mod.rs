//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (shows the logged-in username)
//! GET  /health                 - Health check
//! GET  /static/css/main.css    - Stylesheet
//!
//! # Auth
//! GET  /cadastro               - Register page
//! POST /cadastro               - Register action
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /logout                 - Logout action
//!
//! # Catalog (requires auth)
//! GET  /produtos               - Product listing
//!
//! # Cart (requires auth)
//! GET  /adicionar/{product_id} - Add product to cart
//! GET  /carrinho               - Cart page with total
//! GET  /esvaziar               - Empty cart
//! ```
//!
//! Outcomes of form posts and cart actions are reported by redirecting with
//! `?error=<code>` or `?success=<code>`; see [`Message`].

pub mod auth;
pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    extract::Request,
    http::header,
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::{create_session_layer, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

// =============================================================================
// Messages
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Whether a message reports a failure or a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

/// A user-facing message rendered at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: &'static str,
}

impl Message {
    /// CSS class for the message box.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self.kind {
            MessageKind::Error => "message error",
            MessageKind::Success => "message success",
        }
    }
}

impl MessageQuery {
    /// Resolve the query codes to a message. Errors win over successes and
    /// unknown codes are ignored.
    #[must_use]
    pub fn message(&self) -> Option<Message> {
        let error = self
            .error
            .as_deref()
            .and_then(error_text)
            .map(|text| Message {
                kind: MessageKind::Error,
                text,
            });

        error.or_else(|| {
            self.success
                .as_deref()
                .and_then(success_text)
                .map(|text| Message {
                    kind: MessageKind::Success,
                    text,
                })
        })
    }
}

/// Text for an `?error=` code.
fn error_text(code: &str) -> Option<&'static str> {
    match code {
        "empty_fields" => Some("Preencha usuário e senha."),
        "invalid_username" => Some("Nome de usuário inválido."),
        "username_taken" => Some("Usuário já existe!"),
        "invalid_credentials" => Some("Usuário ou senha inválidos."),
        "product_not_found" => Some("Produto não encontrado."),
        _ => None,
    }
}

/// Text for a `?success=` code.
fn success_text(code: &str) -> Option<&'static str> {
    match code {
        "registered" => Some("Cadastro realizado! Faça login para continuar."),
        "added" => Some("Produto adicionado ao carrinho."),
        "emptied" => Some("Carrinho esvaziado."),
        _ => None,
    }
}

// =============================================================================
// Router
// =============================================================================

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/cadastro", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/adicionar/{product_id}", get(cart::add))
        .route("/carrinho", get(cart::show))
        .route("/esvaziar", get(cart::empty))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/static/css/main.css", get(stylesheet))
        .route("/produtos", get(products::index))
        .merge(auth_routes())
        .merge(cart_routes())
        .fallback(not_found)
}

/// Build the complete application with its middleware stack.
///
/// Error tracking layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(&state);

    routes()
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Fallback for unknown paths.
async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Site stylesheet, embedded at compile time.
async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../../static/css/main.css"),
    )
}
