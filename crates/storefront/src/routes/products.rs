//! Product listing route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::Product;
use crate::routes::{Message, MessageQuery};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.to_string(),
        }
    }
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub username: Option<String>,
    pub message: Option<Message>,
    pub products: Vec<ProductView>,
}

/// Display the catalog.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    ProductsTemplate {
        username: Some(user.username.into_inner()),
        message: query.message(),
        products: state.catalog().products().iter().map(ProductView::from).collect(),
    }
}
