//! Router-level tests for the storefront.
//!
//! Each test builds the full application with an in-memory repository and
//! drives it with `oneshot`, carrying the session cookie by hand the way a
//! browser would.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use secrecy::SecretString;
use tower::ServiceExt;

use loja_storefront::catalog::Catalog;
use loja_storefront::config::{SentryConfig, StorefrontConfig};
use loja_storefront::db::InMemoryUserRepository;
use loja_storefront::middleware::SESSION_COOKIE_NAME;
use loja_storefront::routes;
use loja_storefront::state::AppState;

// =============================================================================
// Helpers
// =============================================================================

const TEST_SECRET: &str =
    "k3Jx9QvB7mZ2pLw8RtY4nHc6FsD1aGe5UiO0VbNqXyTzMrWsEdCfVgBhNjMkLpQa";

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 5000,
        base_url: "http://localhost:5000".to_string(),
        session_secret: SecretString::from(TEST_SECRET.to_string()),
        session_max_age_seconds: 300,
        sentry: SentryConfig::default(),
    }
}

fn test_app() -> Router {
    let state = AppState::new(
        test_config(),
        Arc::new(InMemoryUserRepository::new()),
        Catalog::default(),
    )
    .unwrap();
    routes::app(state)
}

/// A minimal browser: one app and at most one session cookie.
struct Client {
    app: Router,
    cookie: Option<String>,
}

impl Client {
    fn new() -> Self {
        Self {
            app: test_app(),
            cookie: None,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(cookie) = session_cookie(&response) {
            self.cookie = Some(cookie);
        }
        response
    }

    async fn get(&mut self, uri: &str) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&mut self, uri: &str, body: &str) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn register(&mut self, username: &str, password: &str) -> Response<Body> {
        self.post_form("/cadastro", &format!("username={username}&password={password}"))
            .await
    }

    async fn login(&mut self, username: &str, password: &str) -> Response<Body> {
        self.post_form("/login", &format!("username={username}&password={password}"))
            .await
    }
}

/// Extract `name=value` of the session cookie from a response, if set.
fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .map(str::to_string)
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Public Pages
// =============================================================================

#[tokio::test]
async fn test_health() {
    let mut client = Client::new();
    let response = client.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_home_anonymous() {
    let mut client = Client::new();
    let response = client.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::CONTENT_SECURITY_POLICY));
    assert!(response.headers().contains_key("x-request-id"));
    let body = body_text(response).await;
    assert!(body.contains("Você não está logado."));
}

#[tokio::test]
async fn test_stylesheet_served() {
    let mut client = Client::new();
    let response = client.get("/static/css/main.css").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/css; charset=utf-8"
    );
}

#[tokio::test]
async fn test_unknown_path_not_found() {
    let mut client = Client::new();
    let response = client.get("/nao-existe").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_protected_pages_redirect_to_login() {
    let mut client = Client::new();

    for uri in ["/produtos", "/carrinho", "/adicionar/1", "/esvaziar"] {
        let response = client.get(uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }
}

// =============================================================================
// Registration and Login
// =============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let mut client = Client::new();

    let response = client.register("alice", "pw1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?success=registered");
    // Registering does not log the user in
    assert!(client.cookie.is_none());

    let response = client.login("alice", "pw1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(client.cookie.is_some());

    let response = client.get("/").await;
    let body = body_text(response).await;
    assert!(body.contains("alice"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let mut client = Client::new();

    client.register("alice", "pw1").await;
    let response = client.register("alice", "other").await;

    assert_eq!(location(&response), "/cadastro?error=username_taken");

    // The original password still works
    let response = client.login("alice", "pw1").await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_register_empty_fields() {
    let mut client = Client::new();

    let response = client.register("", "pw1").await;
    assert_eq!(location(&response), "/cadastro?error=empty_fields");

    let response = client.register("alice", "").await;
    assert_eq!(location(&response), "/cadastro?error=empty_fields");

    let response = client.post_form("/cadastro", "").await;
    assert_eq!(location(&response), "/cadastro?error=empty_fields");
}

#[tokio::test]
async fn test_register_page_shows_message() {
    let mut client = Client::new();
    let response = client.get("/cadastro?error=username_taken").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Usuário já existe!"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let mut client = Client::new();
    client.register("alice", "pw1").await;

    let response = client.login("alice", "wrong").await;
    assert_eq!(location(&response), "/login?error=invalid_credentials");
    assert!(client.cookie.is_none());

    let response = client.get("/produtos").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let mut client = Client::new();

    let response = client.login("ghost", "pw1").await;
    assert_eq!(location(&response), "/login?error=invalid_credentials");
}

#[tokio::test]
async fn test_portuguese_field_names() {
    let mut client = Client::new();

    let response = client
        .post_form("/cadastro", "usuario=bruno&senha=segredo")
        .await;
    assert_eq!(location(&response), "/login?success=registered");

    let response = client
        .post_form("/login", "usuario=bruno&senha=segredo")
        .await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_tampered_cookie_is_anonymous() {
    let mut client = Client::new();
    client.register("alice", "pw1").await;
    client.login("alice", "pw1").await;

    client.cookie = Some(format!("{SESSION_COOKIE_NAME}=forged"));
    let response = client.get("/produtos").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_logout() {
    let mut client = Client::new();
    client.register("alice", "pw1").await;
    client.login("alice", "pw1").await;
    let logged_in_cookie = client.cookie.clone();

    let response = client.get("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    // The old cookie no longer maps to a session
    client.cookie = logged_in_cookie;
    let response = client.get("/produtos").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_logout_without_session() {
    let mut client = Client::new();

    let response = client.get("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

// =============================================================================
// Catalog and Cart
// =============================================================================

#[tokio::test]
async fn test_product_listing() {
    let mut client = Client::new();
    client.register("alice", "pw1").await;
    client.login("alice", "pw1").await;

    let response = client.get("/produtos").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Camiseta"));
    assert!(body.contains("Calça Jeans"));
    assert!(body.contains("Tênis"));
    assert!(body.contains("R$ 49.90"));
    assert!(body.contains("/adicionar/3"));
}

#[tokio::test]
async fn test_add_to_cart_and_view_total() {
    let mut client = Client::new();
    client.register("alice", "pw1").await;
    client.login("alice", "pw1").await;

    let response = client.get("/adicionar/1").await;
    assert_eq!(location(&response), "/produtos?success=added");

    let response = client.get("/carrinho").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Camiseta"));
    assert!(body.contains("R$ 49.90"));

    client.get("/adicionar/1").await;
    client.get("/adicionar/3").await;

    let body = body_text(client.get("/carrinho").await).await;
    assert!(body.contains("R$ 249.70"));
}

#[tokio::test]
async fn test_add_unknown_product() {
    let mut client = Client::new();
    client.register("alice", "pw1").await;
    client.login("alice", "pw1").await;

    let response = client.get("/adicionar/99").await;
    assert_eq!(location(&response), "/produtos?error=product_not_found");

    let body = body_text(client.get("/carrinho").await).await;
    assert!(body.contains("Seu carrinho está vazio."));
    assert!(body.contains("R$ 0.00"));
}

#[tokio::test]
async fn test_add_out_of_range_or_malformed_product() {
    let mut client = Client::new();
    client.register("alice", "pw1").await;
    client.login("alice", "pw1").await;

    for uri in ["/adicionar/99999999999", "/adicionar/abc", "/adicionar/-1"] {
        let response = client.get(uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/produtos?error=product_not_found", "{uri}");
    }

    let body = body_text(client.get("/carrinho").await).await;
    assert!(body.contains("Seu carrinho está vazio."));
}

#[tokio::test]
async fn test_empty_cart_is_idempotent() {
    let mut client = Client::new();
    client.register("alice", "pw1").await;
    client.login("alice", "pw1").await;
    client.get("/adicionar/2").await;

    let response = client.get("/esvaziar").await;
    assert_eq!(location(&response), "/carrinho?success=emptied");

    let response = client.get("/esvaziar").await;
    assert_eq!(location(&response), "/carrinho?success=emptied");

    let target = location(&response).to_string();
    let body = body_text(client.get(&target).await).await;
    assert!(body.contains("Seu carrinho está vazio."));
    assert!(body.contains("Carrinho esvaziado."));
    assert!(body.contains("R$ 0.00"));
}

#[tokio::test]
async fn test_cart_survives_relogin() {
    let mut client = Client::new();
    client.register("alice", "pw1").await;
    client.login("alice", "pw1").await;
    client.get("/adicionar/2").await;
    client.get("/logout").await;

    client.login("alice", "pw1").await;
    let body = body_text(client.get("/carrinho").await).await;
    assert!(body.contains("Calça Jeans"));
    assert!(body.contains("R$ 89.90"));
}

#[tokio::test]
async fn test_carts_are_per_user() {
    let app = test_app();
    let mut alice = Client {
        app: app.clone(),
        cookie: None,
    };
    let mut bob = Client { app, cookie: None };

    alice.register("alice", "pw1").await;
    alice.login("alice", "pw1").await;
    bob.register("bob", "pw2").await;
    bob.login("bob", "pw2").await;

    alice.get("/adicionar/3").await;

    let body = body_text(bob.get("/carrinho").await).await;
    assert!(body.contains("Seu carrinho está vazio."));

    let body = body_text(alice.get("/carrinho").await).await;
    assert!(body.contains("R$ 149.90"));
}
