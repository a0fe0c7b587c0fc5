//! Cart Repositories

mod carts;
mod items;

pub(crate) use carts::PgCartsRepository;
pub(crate) use items::{ItemAvailability, PgCartItemsRepository, try_get_quantity, try_get_variant};
