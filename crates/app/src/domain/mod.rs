//! Storefront Domain Concerns

pub(crate) mod amounts;
pub mod carts;
pub mod categories;
pub mod orders;
pub mod pagination;
pub mod products;
pub mod reviews;
pub mod rides;
pub(crate) mod search;
pub mod users;
