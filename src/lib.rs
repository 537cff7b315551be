//! Shopfront
//!
//! Shopfront is a shopping cart pricing engine: quantity discounts per product,
//! cart-wide coupons, stock-aware cart edits and a small product catalog.

pub mod cart;
pub mod catalog;
pub mod coupons;
pub mod discounts;
pub mod fixtures;
pub mod percentages;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod state;
pub mod utils;
