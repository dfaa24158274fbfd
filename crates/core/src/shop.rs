//! Per-visitor shop state.
//!
//! [`ShopState`] is the single owner of everything a visitor can change: the
//! active view and the cart. Views read snapshots of it and request changes
//! by dispatching an [`Action`]; nothing else mutates the cart.

use serde::{Deserialize, Serialize};

use crate::cart::CartState;

/// Message shown when a visitor tries to check out.
pub const CHECKOUT_NOTICE: &str = "Checkout – Coming Soon!";

/// The two pages of the shop. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Products grouped by category.
    #[default]
    Listing,
    /// Cart rows plus the order summary.
    Cart,
}

impl View {
    /// Stable name used in forms and URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Listing => "products",
            Self::Cart => "cart",
        }
    }

    /// Parse a form value produced by [`View::as_str`].
    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "products" => Some(Self::Listing),
            "cart" => Some(Self::Cart),
            _ => None,
        }
    }
}

/// A visitor request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Switch the active view.
    Navigate(View),
    /// "Add to Cart" on the listing. Ignored once the product is in the cart;
    /// further units are added from the cart view.
    AddFromListing(String),
    /// "+" on a cart row.
    Increment(String),
    /// "-" on a cart row.
    Decrement(String),
    /// "Delete" on a cart row.
    Remove(String),
    /// "Proceed to Checkout".
    Checkout,
}

/// What a dispatched action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State was updated (or the action was a defined no-op).
    Applied,
    /// The action was deliberately not applied.
    Ignored,
    /// Checkout is not available yet; nothing changed.
    CheckoutUnavailable,
}

/// Active view plus cart for one visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopState {
    /// Page currently shown.
    #[serde(default)]
    pub view: View,
    cart: CartState,
}

impl ShopState {
    /// Fresh state: listing view, empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the cart.
    #[must_use]
    pub const fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        match action {
            Action::Navigate(view) => {
                self.view = view;
                Outcome::Applied
            }
            Action::AddFromListing(id) => {
                if self.cart.contains(&id) {
                    return Outcome::Ignored;
                }
                self.cart.add(&id);
                Outcome::Applied
            }
            Action::Increment(id) => {
                self.cart.increment(&id);
                Outcome::Applied
            }
            Action::Decrement(id) => {
                self.cart.decrement(&id);
                Outcome::Applied
            }
            Action::Remove(id) => {
                self.cart.remove(&id);
                Outcome::Applied
            }
            Action::Checkout => Outcome::CheckoutUnavailable,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ShopState::new();
        assert_eq!(state.view, View::Listing);
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_navigation_toggles_views() {
        let mut state = ShopState::new();
        assert_eq!(state.dispatch(Action::Navigate(View::Cart)), Outcome::Applied);
        assert_eq!(state.view, View::Cart);
        state.dispatch(Action::Navigate(View::Listing));
        assert_eq!(state.view, View::Listing);
        state.dispatch(Action::Navigate(View::Listing));
        assert_eq!(state.view, View::Listing);
    }

    #[test]
    fn test_listing_add_only_once() {
        let mut state = ShopState::new();
        assert_eq!(
            state.dispatch(Action::AddFromListing("pothos".into())),
            Outcome::Applied
        );
        assert_eq!(
            state.dispatch(Action::AddFromListing("pothos".into())),
            Outcome::Ignored
        );
        assert_eq!(state.cart().quantity("pothos"), NonZeroU32::new(1));

        state.dispatch(Action::Increment("pothos".into()));
        assert_eq!(state.cart().quantity("pothos"), NonZeroU32::new(2));
    }

    #[test]
    fn test_cart_row_actions() {
        let mut state = ShopState::new();
        state.dispatch(Action::AddFromListing("zz".into()));
        state.dispatch(Action::AddFromListing("monstera".into()));
        state.dispatch(Action::Decrement("monstera".into()));
        assert!(!state.cart().contains("monstera"));

        state.dispatch(Action::Remove("zz".into()));
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_checkout_changes_nothing() {
        let mut state = ShopState::new();
        state.dispatch(Action::AddFromListing("peace".into()));
        let before = state.clone();
        assert_eq!(
            state.dispatch(Action::Checkout),
            Outcome::CheckoutUnavailable
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_view_params() {
        assert_eq!(View::from_param("cart"), Some(View::Cart));
        assert_eq!(View::from_param(View::Listing.as_str()), Some(View::Listing));
        assert_eq!(View::from_param("checkout"), None);
    }

    #[test]
    fn test_state_serde_roundtrip() {
        let mut state = ShopState::new();
        state.dispatch(Action::AddFromListing("snake".into()));
        state.dispatch(Action::Navigate(View::Cart));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["view"], "cart");
        assert_eq!(json["cart"]["snake"], 1);

        let back: ShopState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
