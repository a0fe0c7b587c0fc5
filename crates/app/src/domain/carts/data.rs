//! Cart Data

use storefront::items::Variant;

use crate::domain::{carts::records::CartItemUuid, products::records::ProductUuid};

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    /// UUID given to the line if it does not merge into an existing one.
    pub uuid: CartItemUuid,
    pub product: ProductUuid,
    pub quantity: u32,
    pub variant: Variant,
}
