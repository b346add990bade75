//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::OptionalAuth;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub username: Option<String>,
}

/// Display the home page, greeting the logged-in user if any.
///
/// The username comes from the signed session; no separate username cookie is set.
pub async fn home(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    HomeTemplate {
        username: user.map(|u| u.username.into_inner()),
    }
}
