//! Authentication route handlers.
//!
//! Handles registration, login and logout with local username/password
//! accounts. The logged-in identity lives only in the signed session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use loja_core::UsernameError;

use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::{Message, MessageQuery};
use crate::services::AuthError;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Registration and login form data.
///
/// Missing fields deserialize as empty strings so they are reported as a
/// validation message instead of a rejected request.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default, alias = "usuario")]
    pub username: String,
    #[serde(default, alias = "senha")]
    pub password: String,
}

impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub username: Option<String>,
    pub message: Option<Message>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub username: Option<String>,
    pub message: Option<Message>,
}

/// Map a form validation failure to its message code.
const fn validation_code(err: &AuthError) -> Option<&'static str> {
    match err {
        AuthError::InvalidUsername(UsernameError::Empty) | AuthError::EmptyPassword => {
            Some("empty_fields")
        }
        AuthError::InvalidUsername(_) => Some("invalid_username"),
        _ => None,
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    RegisterTemplate {
        username: user.map(|u| u.username.into_inner()),
        message: query.message(),
    }
}

/// Handle registration form submission.
///
/// A new account must still log in; registration does not start a session.
#[instrument(skip(state, form), fields(username = %form.username))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect> {
    match state.auth().register(&form.username, &form.password).await {
        Ok(_) => Ok(Redirect::to("/login?success=registered")),
        Err(AuthError::UserAlreadyExists) => {
            tracing::info!("registration rejected: username taken");
            Ok(Redirect::to("/cadastro?error=username_taken"))
        }
        Err(e) => match validation_code(&e) {
            Some(code) => Ok(Redirect::to(&format!("/cadastro?error={code}"))),
            None => Err(e.into()),
        },
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        username: user.map(|u| u.username.into_inner()),
        message: query.message(),
    }
}

/// Handle login form submission.
///
/// On success the session is bound to the user and the browser is sent home.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect> {
    let user = match state.auth().login(&form.username, &form.password).await {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("login failed: invalid credentials");
            return Ok(Redirect::to("/login?error=invalid_credentials"));
        }
        Err(e) => {
            return match validation_code(&e) {
                Some(code) => Ok(Redirect::to(&format!("/login?error={code}"))),
                None => Err(e.into()),
            };
        }
    };

    let current_user = CurrentUser {
        username: user.username,
    };
    set_current_user(&session, &current_user).await?;

    set_sentry_user(&current_user.username);
    add_breadcrumb("auth", "Logged in", None);
    tracing::info!("user logged in");

    Ok(Redirect::to("/"))
}

/// Handle logout.
///
/// Safe to call without a session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();

    Ok(Redirect::to("/"))
}
