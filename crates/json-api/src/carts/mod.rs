//! Carts

pub(crate) mod coupon;
mod errors;
mod handlers;
pub(crate) mod items;
mod models;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
pub(crate) use models::VariantBody;
