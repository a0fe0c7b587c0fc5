//! Storefront
//!
//! Pricing and catalogue rules shared by the storefront services: cart line items, coupons,
//! totals recomputation, order pricing snapshots, product ratings and category trees.
//!
//! Everything in this crate is pure; persistence and HTTP live in the `storefront-app` and
//! `storefront-json` crates.

pub mod cart;
pub mod categories;
pub mod coupons;
pub mod discounts;
pub mod items;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod ratings;
