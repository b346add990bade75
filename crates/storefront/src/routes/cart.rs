//! Cart route handlers.
//!
//! Every cart route requires a logged-in user; the cart belongs to the
//! account, not to the browser session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use tracing::instrument;

use loja_core::ProductId;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{Message, MessageQuery};
use crate::services::{CartError, CartSummary};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub name: String,
    pub price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: usize,
}

impl From<&CartSummary> for CartView {
    fn from(summary: &CartSummary) -> Self {
        Self {
            items: summary
                .items
                .iter()
                .map(|item| CartItemView {
                    name: item.name.clone(),
                    price: item.price.to_string(),
                })
                .collect(),
            total: summary.total.to_string(),
            item_count: summary.len(),
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub username: Option<String>,
    pub message: Option<Message>,
    pub cart: CartView,
}

/// Display the cart and its total.
#[instrument(skip(state, user, query), fields(username = %user.username))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<CartShowTemplate> {
    let summary = state.cart().view(&user.username).await?;

    Ok(CartShowTemplate {
        username: Some(user.username.into_inner()),
        message: query.message(),
        cart: CartView::from(&summary),
    })
}

/// Redirect target when the requested product isn't in the catalog.
const PRODUCT_NOT_FOUND_REDIRECT: &str = "/produtos?error=product_not_found";

/// Parse a product id path segment.
///
/// Segments that can't name a catalog product (non-numeric, or outside the
/// id range) yield `None`.
fn parse_product_id(segment: &str) -> Option<ProductId> {
    segment.parse::<i32>().ok().map(ProductId::new)
}

/// Add a catalog product to the cart.
///
/// Unknown products leave the cart unchanged and are reported on the
/// product listing.
#[instrument(skip(state, user), fields(username = %user.username))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(segment): Path<String>,
) -> Result<Redirect> {
    let Some(product_id) = parse_product_id(&segment) else {
        tracing::info!("product not found");
        return Ok(Redirect::to(PRODUCT_NOT_FOUND_REDIRECT));
    };

    match state.cart().add(&user.username, product_id).await {
        Ok(product) => {
            let product_id = product.id.to_string();
            add_breadcrumb(
                "cart",
                "Added product",
                Some(&[("product_id", product_id.as_str())]),
            );
            Ok(Redirect::to("/produtos?success=added"))
        }
        Err(CartError::ProductNotFound(_)) => {
            tracing::info!("product not found");
            Ok(Redirect::to(PRODUCT_NOT_FOUND_REDIRECT))
        }
        Err(e) => Err(e.into()),
    }
}

/// Empty the cart.
#[instrument(skip(state, user), fields(username = %user.username))]
pub async fn empty(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Redirect> {
    state.cart().empty(&user.username).await?;
    add_breadcrumb("cart", "Emptied cart", None);

    Ok(Redirect::to("/carrinho?success=emptied"))
}
