//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Active view (product listing or cart)
//! POST /navigate           - Switch view (form: to=products|cart)
//!
//! # Cart (form posts, all redirect to /)
//! POST /cart/add           - Add from the listing (ignored once in cart)
//! POST /cart/increment     - One more unit
//! POST /cart/decrement     - One fewer unit (row removed at zero)
//! POST /cart/remove        - Delete the row
//! GET  /cart/count         - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout           - Placeholder, queues a "coming soon" notice
//! ```

pub mod cart;
pub mod products;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .route("/navigate", post(shop::navigate))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
}
