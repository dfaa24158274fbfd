//! Cart route handlers.
//!
//! Every cart control is a plain form post. Handlers dispatch one action into
//! the session's shop state and redirect back to `/`, which re-renders the
//! active view with freshly computed totals.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use leaf_and_co_core::shop::CHECKOUT_NOTICE;
use leaf_and_co_core::totals::{line_total, total_items};
use leaf_and_co_core::{Action, CartState, CartSummary, Catalog, Outcome};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::session;
use crate::routes::shop::NavView;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
    pub image_url: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_items: u64,
    pub total_cost: String,
}

impl CartView {
    /// Join the cart against the catalog.
    ///
    /// Entries whose product is not in the catalog get no row, but still
    /// count toward the item total.
    #[must_use]
    pub fn build(catalog: &Catalog, cart: &CartState) -> Self {
        let items = cart
            .iter()
            .filter_map(|(id, quantity)| {
                let product = catalog.find(id.as_str())?;
                Some(CartItemView {
                    id: product.id.to_string(),
                    name: product.name.clone(),
                    quantity: quantity.get(),
                    unit_price: catalog.price_of(product).display(),
                    line_price: catalog.price(line_total(product, quantity)).display(),
                    image_url: product.image_ref.clone(),
                })
            })
            .collect();

        let summary = CartSummary::compute(cart, catalog);

        Self {
            items,
            total_items: summary.total_items,
            total_cost: summary.total_cost.display(),
        }
    }
}

/// Form data naming a single product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/cart.html")]
pub struct CartTemplate {
    pub nav: NavView,
    pub notice: Option<String>,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Reject product ids the catalog does not know.
fn require_product(state: &AppState, product_id: &str) -> Result<()> {
    if state.catalog().contains(product_id) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("product {product_id}")))
    }
}

/// Add a product from the listing.
///
/// Once the product is in the cart the listing button is disabled, so a
/// repeat post leaves the quantity alone.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    require_product(&state, &form.product_id)?;

    let outcome =
        session::dispatch(&session, Action::AddFromListing(form.product_id.clone())).await?;
    if outcome == Outcome::Ignored {
        tracing::debug!(product_id = %form.product_id, "Product already in cart");
    } else {
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", form.product_id.as_str())]),
        );
    }

    Ok(Redirect::to("/"))
}

/// Add one more unit of a cart row.
#[instrument(skip(state, session))]
pub async fn increment(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    require_product(&state, &form.product_id)?;
    session::dispatch(&session, Action::Increment(form.product_id)).await?;
    Ok(Redirect::to("/"))
}

/// Take one unit off a cart row, removing it at zero.
///
/// Accepts ids missing from the catalog so orphaned rows can be cleared.
#[instrument(skip(session))]
pub async fn decrement(session: Session, Form(form): Form<ProductForm>) -> Result<Redirect> {
    session::dispatch(&session, Action::Decrement(form.product_id)).await?;
    Ok(Redirect::to("/"))
}

/// Delete a cart row.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<ProductForm>) -> Result<Redirect> {
    add_breadcrumb(
        "cart",
        "Removed from cart",
        Some(&[("product_id", form.product_id.as_str())]),
    );
    session::dispatch(&session, Action::Remove(form.product_id)).await?;
    Ok(Redirect::to("/"))
}

/// Get cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let shop = session::load_shop(&session).await?;
    Ok(CartCountTemplate {
        count: total_items(shop.cart()),
    })
}

/// Checkout placeholder.
///
/// Nothing is charged or changed; the visitor sees a "coming soon" notice.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Result<Redirect> {
    let outcome = session::dispatch(&session, Action::Checkout).await?;
    if outcome == Outcome::CheckoutUnavailable {
        tracing::info!("Checkout requested but not available");
        session::set_notice(&session, CHECKOUT_NOTICE).await?;
    }
    Ok(Redirect::to("/"))
}
