//! Totals derived from a cart and a catalog.
//!
//! Nothing here is cached. Every call folds over the cart as it is now, so
//! the numbers shown next to a cart can never drift from its contents.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartState;
use crate::catalog::{Catalog, Product};
use crate::types::Price;

/// Sum of all quantities in the cart.
#[must_use]
pub fn total_items(cart: &CartState) -> u64 {
    cart.iter().map(|(_, quantity)| u64::from(quantity.get())).sum()
}

/// Sum of `quantity × unit_price` over the cart.
///
/// Entries whose product is missing from the catalog contribute nothing.
/// The sum saturates at [`Decimal::MAX`].
#[must_use]
pub fn total_cost(cart: &CartState, catalog: &Catalog) -> Decimal {
    cart.iter()
        .filter_map(|(id, quantity)| {
            catalog
                .find(id.as_str())
                .map(|product| line_total(product, quantity))
        })
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Subtotal for one cart row, saturating at [`Decimal::MAX`].
#[must_use]
pub fn line_total(product: &Product, quantity: NonZeroU32) -> Decimal {
    product
        .unit_price
        .saturating_mul(Decimal::from(quantity.get()))
}

/// Snapshot of a cart's totals, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Number of units across all entries.
    pub total_items: u64,
    /// Cost of every entry found in the catalog.
    pub total_cost: Price,
}

impl CartSummary {
    /// Fold the cart against the catalog.
    #[must_use]
    pub fn compute(cart: &CartState, catalog: &Catalog) -> Self {
        Self {
            total_items: total_items(cart),
            total_cost: catalog.price(total_cost(cart, catalog)),
        }
    }
}
