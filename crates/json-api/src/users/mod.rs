//! Users

mod errors;
mod handlers;
mod models;
pub(crate) mod wishlist;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
