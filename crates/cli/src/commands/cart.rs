//! Cart simulation: replay store actions against an empty cart.

use std::path::Path;
use std::str::FromStr;

use leaf_and_co_core::totals::line_total;
use leaf_and_co_core::{CartState, CartSummary, Catalog};
use tracing::{info, warn};

use super::catalog::load_catalog;

/// Errors parsing a simulated action.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("action '{0}' must look like <op>:<product_id>")]
    Malformed(String),
    #[error("unknown operation '{0}' (expected add, inc, dec or rm)")]
    UnknownOperation(String),
}

/// One cart store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOp {
    Add(String),
    Increment(String),
    Decrement(String),
    Remove(String),
}

impl CartOp {
    /// Apply the operation to a cart.
    pub fn apply(&self, cart: &mut CartState) {
        match self {
            Self::Add(id) => cart.add(id),
            Self::Increment(id) => cart.increment(id),
            Self::Decrement(id) => cart.decrement(id),
            Self::Remove(id) => cart.remove(id),
        }
    }
}

impl FromStr for CartOp {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, id) = s
            .split_once(':')
            .filter(|(_, id)| !id.is_empty())
            .ok_or_else(|| ActionParseError::Malformed(s.to_string()))?;
        let id = id.to_string();

        match op {
            "add" => Ok(Self::Add(id)),
            "inc" => Ok(Self::Increment(id)),
            "dec" => Ok(Self::Decrement(id)),
            "rm" => Ok(Self::Remove(id)),
            other => Err(ActionParseError::UnknownOperation(other.to_string())),
        }
    }
}

/// Parse every action, then fold them into a fresh cart.
///
/// # Errors
///
/// Returns the first action that fails to parse. Nothing is applied in that
/// case.
pub fn replay(actions: &[String]) -> Result<CartState, ActionParseError> {
    let ops = actions
        .iter()
        .map(|action| action.parse::<CartOp>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut cart = CartState::new();
    for op in &ops {
        op.apply(&mut cart);
    }
    Ok(cart)
}

/// Replay actions and log the resulting cart and totals.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or an action is malformed.
pub async fn simulate(
    path: Option<&Path>,
    actions: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog: Catalog = load_catalog(path).await?;
    let cart = replay(actions)?;

    if cart.is_empty() {
        info!("Cart is empty");
    }

    for (id, quantity) in cart.iter() {
        match catalog.find(id.as_str()) {
            Some(product) => info!(
                "  {:<24} x{:<3} {}",
                product.name,
                quantity,
                catalog.price(line_total(product, quantity))
            ),
            None => warn!("  {id} x{quantity} is not in the catalog and costs nothing"),
        }
    }

    let summary = CartSummary::compute(&cart, &catalog);
    info!("Total items: {}", summary.total_items);
    info!("Total cost: {}", summary.total_cost);

    Ok(())
}
