//! Leaf & Co. Core - Shared storefront types and cart logic.
//!
//! This crate provides the domain used by all Leaf & Co. components:
//! - `storefront` - Server-rendered shop (product listing and cart views)
//! - `cli` - Command-line tools for catalog validation and cart simulation
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP, no
//! sessions. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype keys and prices
//! - [`catalog`] - The static, validated product catalog
//! - [`cart`] - The cart state store (product id to positive quantity)
//! - [`totals`] - Totals derived from a cart and a catalog
//! - [`shop`] - Per-visitor shop state: active view plus cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod shop;
pub mod totals;
pub mod types;

pub use cart::CartState;
pub use catalog::{Catalog, CatalogError, Product};
pub use shop::{Action, Outcome, ShopState, View};
pub use totals::CartSummary;
pub use types::*;
