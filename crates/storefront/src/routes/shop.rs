//! Shop page: renders whichever view the visitor has active.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use leaf_and_co_core::{Action, CartSummary, ShopState, View};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::session;
use crate::routes::cart::{CartTemplate, CartView};
use crate::routes::products::{ListingTemplate, listing_sections};
use crate::state::AppState;

/// Header navigation display data.
#[derive(Clone)]
pub struct NavView {
    pub listing_active: bool,
    pub cart_active: bool,
    pub item_count: u64,
    /// Form values posted to `/navigate`.
    pub listing_param: &'static str,
    pub cart_param: &'static str,
}

impl NavView {
    /// Build header data for the given view and cart totals.
    #[must_use]
    pub const fn new(view: View, summary: &CartSummary) -> Self {
        Self {
            listing_active: matches!(view, View::Listing),
            cart_active: matches!(view, View::Cart),
            item_count: summary.total_items,
            listing_param: View::Listing.as_str(),
            cart_param: View::Cart.as_str(),
        }
    }
}

/// Navigation form data.
#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub to: String,
}

/// Render the visitor's active view.
///
/// Totals are recomputed from the session cart on every render.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<Response> {
    let shop = session::load_shop(&session).await?;
    let notice = session::take_notice(&session).await?;
    Ok(render(&state, &shop, notice))
}

/// Switch between the listing and the cart.
#[instrument(skip(session))]
pub async fn navigate(session: Session, Form(form): Form<NavigateForm>) -> Result<Redirect> {
    let view = View::from_param(&form.to)
        .ok_or_else(|| AppError::BadRequest(format!("unknown view '{}'", form.to)))?;
    session::dispatch(&session, Action::Navigate(view)).await?;
    Ok(Redirect::to("/"))
}

/// Render a shop state snapshot into the matching page.
fn render(state: &AppState, shop: &ShopState, notice: Option<String>) -> Response {
    let catalog = state.catalog();
    let summary = CartSummary::compute(shop.cart(), catalog);
    let nav = NavView::new(shop.view, &summary);

    match shop.view {
        View::Listing => ListingTemplate {
            nav,
            notice,
            sections: listing_sections(catalog, shop.cart()),
        }
        .into_response(),
        View::Cart => CartTemplate {
            nav,
            notice,
            cart: CartView::build(catalog, shop.cart()),
        }
        .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use leaf_and_co_core::{CartState, Catalog};

    use super::*;

    #[test]
    fn test_nav_view_marks_exactly_one_active() {
        let catalog = Catalog::builtin();
        let mut cart = CartState::new();
        cart.add("pothos");
        cart.add("pothos");
        let summary = CartSummary::compute(&cart, &catalog);

        let listing = NavView::new(View::Listing, &summary);
        assert!(listing.listing_active && !listing.cart_active);
        assert_eq!(listing.item_count, 2);

        let cart_nav = NavView::new(View::Cart, &summary);
        assert!(cart_nav.cart_active && !cart_nav.listing_active);
    }

    #[test]
    fn test_nav_params_parse_back_to_views() {
        let summary = CartSummary::compute(&CartState::new(), &Catalog::builtin());
        let nav = NavView::new(View::Listing, &summary);
        assert_eq!(View::from_param(nav.listing_param), Some(View::Listing));
        assert_eq!(View::from_param(nav.cart_param), Some(View::Cart));
    }
}
