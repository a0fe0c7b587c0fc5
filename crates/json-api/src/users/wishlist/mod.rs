//! Wishlist

mod handlers;

pub(crate) use handlers::*;
