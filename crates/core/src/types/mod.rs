//! Core types for Leaf & Co.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;

pub use id::{Category, ProductId};
pub use price::{CurrencyCode, Price};
