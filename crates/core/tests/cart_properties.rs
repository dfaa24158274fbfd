//! Property tests for the cart state store and derived totals.

use std::collections::HashMap;
use std::num::NonZeroU32;

use leaf_and_co_core::totals::{total_cost, total_items};
use leaf_and_co_core::{CartState, Catalog};
use proptest::prelude::*;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Increment(String),
    Decrement(String),
    Remove(String),
}

fn product_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("pothos".to_string()),
        Just("snake".to_string()),
        Just("zz".to_string()),
        Just("monstera".to_string()),
        Just("fern".to_string()),
        "[a-z]{1,6}",
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        product_id().prop_map(Op::Add),
        product_id().prop_map(Op::Increment),
        product_id().prop_map(Op::Decrement),
        product_id().prop_map(Op::Remove),
    ]
}

fn apply(cart: &mut CartState, op: &Op) {
    match op {
        Op::Add(id) => cart.add(id),
        Op::Increment(id) => cart.increment(id),
        Op::Decrement(id) => cart.decrement(id),
        Op::Remove(id) => cart.remove(id),
    }
}

proptest! {
    #[test]
    fn prop_adds_count_calls_per_id(ids in prop::collection::vec((product_id(), any::<bool>()), 0..64)) {
        let mut cart = CartState::new();
        let mut expected: HashMap<String, u32> = HashMap::new();
        for (id, use_increment) in &ids {
            if *use_increment {
                cart.increment(id);
            } else {
                cart.add(id);
            }
            *expected.entry(id.clone()).or_insert(0) += 1;
        }

        prop_assert_eq!(cart.len(), expected.len());
        for (id, count) in &expected {
            prop_assert_eq!(cart.quantity(id).map(NonZeroU32::get), Some(*count));
        }
    }

    #[test]
    fn prop_never_holds_zero_quantity(ops in prop::collection::vec(op(), 0..128)) {
        let mut cart = CartState::new();
        for op in &ops {
            apply(&mut cart, op);
            for (_, quantity) in cart.iter() {
                prop_assert!(quantity.get() > 0);
            }
        }
    }

    #[test]
    fn prop_decrement_absent_is_noop(ops in prop::collection::vec(op(), 0..32), missing in "[A-Z]{3,8}") {
        let mut cart = CartState::new();
        for op in &ops {
            apply(&mut cart, op);
        }
        let before = cart.clone();
        cart.decrement(&missing);
        prop_assert_eq!(cart, before);
    }

    #[test]
    fn prop_remove_then_contains_is_false(ops in prop::collection::vec(op(), 0..32), id in product_id()) {
        let mut cart = CartState::new();
        for op in &ops {
            apply(&mut cart, op);
        }
        cart.remove(&id);
        prop_assert!(!cart.contains(&id));
    }

    #[test]
    fn prop_totals_match_fresh_fold(ops in prop::collection::vec(op(), 0..64)) {
        let catalog = Catalog::builtin();
        let mut cart = CartState::new();
        for op in &ops {
            apply(&mut cart, op);

            let items: u64 = cart.iter().map(|(_, q)| u64::from(q.get())).sum();
            prop_assert_eq!(total_items(&cart), items);

            let cost: Decimal = cart
                .iter()
                .map(|(id, q)| {
                    catalog
                        .find(id.as_str())
                        .map_or(Decimal::ZERO, |p| p.unit_price * Decimal::from(q.get()))
                })
                .sum();
            prop_assert_eq!(total_cost(&cart, &catalog), cost);
        }
    }

    #[test]
    fn prop_single_entry_cost_is_linear(quantity in 1u32..500) {
        let catalog = Catalog::builtin();
        let mut cart = CartState::new();
        for _ in 0..quantity {
            cart.add("pothos");
        }
        prop_assert_eq!(total_cost(&cart, &catalog), Decimal::from(299) * Decimal::from(quantity));

        let mut orphan = CartState::new();
        for _ in 0..quantity {
            orphan.add("not-a-plant");
        }
        prop_assert_eq!(total_cost(&orphan, &catalog), Decimal::ZERO);
    }
}

#[test]
fn test_zz_monstera_remove_scenario() {
    let mut cart = CartState::new();
    cart.add("zz");
    cart.add("monstera");
    cart.remove("zz");

    let entries: Vec<(String, u32)> = cart
        .iter()
        .map(|(id, q)| (id.to_string(), q.get()))
        .collect();
    assert_eq!(entries, vec![("monstera".to_string(), 1)]);
}

#[test]
fn test_decrement_nonexistent_on_empty_cart() {
    let mut cart = CartState::new();
    cart.decrement("nonexistent");
    assert_eq!(cart, CartState::new());
    assert!(cart.is_empty());
}
