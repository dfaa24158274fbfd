//! Cart state store.
//!
//! The cart maps a product id to a strictly positive quantity. Quantities are
//! stored as [`NonZeroU32`], so an entry at zero cannot exist: decrementing
//! the last unit deletes the entry instead.
//!
//! The store does not know about the catalog. Any string is accepted as a
//! product id; checking catalog membership is the caller's job.

use std::num::NonZeroU32;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Mapping from product id to quantity, in first-added order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    entries: IndexMap<ProductId, NonZeroU32>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `id`, creating the entry at quantity 1 if needed.
    ///
    /// Quantities saturate at `u32::MAX`.
    pub fn add(&mut self, id: &str) {
        if let Some(quantity) = self.entries.get_mut(id) {
            *quantity = quantity.saturating_add(1);
        } else {
            self.entries.insert(ProductId::new(id), NonZeroU32::MIN);
        }
    }

    /// Same as [`CartState::add`].
    pub fn increment(&mut self, id: &str) {
        self.add(id);
    }

    /// Take one unit of `id` away, deleting the entry when it reaches zero.
    ///
    /// No-op if `id` has no entry.
    pub fn decrement(&mut self, id: &str) {
        let Some(quantity) = self.entries.get_mut(id) else {
            return;
        };
        match NonZeroU32::new(quantity.get() - 1) {
            Some(lower) => *quantity = lower,
            None => {
                self.entries.shift_remove(id);
            }
        }
    }

    /// Delete the entry for `id` if present.
    pub fn remove(&mut self, id: &str) {
        self.entries.shift_remove(id);
    }

    /// Whether `id` has an entry.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Quantity held for `id`.
    #[must_use]
    pub fn quantity(&self, id: &str) -> Option<NonZeroU32> {
        self.entries.get(id).copied()
    }

    /// Entries in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, NonZeroU32)> {
        self.entries.iter().map(|(id, quantity)| (id, *quantity))
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn qty(cart: &CartState, id: &str) -> u32 {
        cart.quantity(id).map_or(0, NonZeroU32::get)
    }

    #[test]
    fn test_add_creates_then_increments() {
        let mut cart = CartState::new();
        cart.add("pothos");
        assert_eq!(qty(&cart, "pothos"), 1);
        cart.add("pothos");
        cart.increment("pothos");
        assert_eq!(qty(&cart, "pothos"), 3);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_accepts_unknown_ids() {
        let mut cart = CartState::new();
        cart.add("not-in-any-catalog");
        assert!(cart.contains("not-in-any-catalog"));
    }

    #[test]
    fn test_decrement_to_zero_removes_entry() {
        let mut cart = CartState::new();
        cart.add("snake");
        cart.decrement("snake");
        assert!(!cart.contains("snake"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_above_one() {
        let mut cart = CartState::new();
        cart.add("zz");
        cart.add("zz");
        cart.decrement("zz");
        assert_eq!(qty(&cart, "zz"), 1);
    }

    #[test]
    fn test_decrement_absent_is_noop() {
        let mut cart = CartState::new();
        cart.add("peace");
        let before = cart.clone();
        cart.decrement("nonexistent");
        assert_eq!(cart, before);

        let mut empty = CartState::new();
        empty.decrement("nonexistent");
        assert_eq!(empty, CartState::new());
    }

    #[test]
    fn test_remove() {
        let mut cart = CartState::new();
        cart.add("zz");
        cart.add("monstera");
        cart.remove("zz");
        assert!(!cart.contains("zz"));
        assert_eq!(qty(&cart, "monstera"), 1);
        assert_eq!(cart.len(), 1);

        cart.remove("zz");
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_iter_keeps_first_added_order() {
        let mut cart = CartState::new();
        cart.add("succulent");
        cart.add("pothos");
        cart.add("monstera");
        cart.add("pothos");
        cart.remove("succulent");
        cart.add("succulent");

        let order: Vec<&str> = cart.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["pothos", "monstera", "succulent"]);
    }

    #[test]
    fn test_add_saturates() {
        let json = format!("{{\"pothos\": {}}}", u32::MAX);
        let mut cart: CartState = serde_json::from_str(&json).unwrap();
        cart.add("pothos");
        assert_eq!(qty(&cart, "pothos"), u32::MAX);
    }

    #[test]
    fn test_serde_roundtrip_preserves_order() {
        let mut cart = CartState::new();
        cart.add("zz");
        cart.add("pothos");
        cart.add("pothos");

        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"{"zz":1,"pothos":2}"#);
        let back: CartState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let result = serde_json::from_str::<CartState>(r#"{"pothos": 0}"#);
        assert!(result.is_err());
    }
}
