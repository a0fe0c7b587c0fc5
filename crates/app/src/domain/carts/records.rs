//! Cart Records

use std::fmt;

use jiff::Timestamp;
use storefront::{coupons::Coupon, items::Variant, pricing::CartTotals};

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user: UserUuid,
    pub items: Vec<CartItemRecord>,
    pub coupon: Option<Coupon>,

    /// Derived figures as of the last mutation.
    pub totals: CartTotals,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product: ProductUuid,
    pub variant: Variant,
    pub quantity: u32,

    /// Unit price captured when the product was last added.
    pub unit_price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Why a cart line can no longer be checked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidItemReason {
    /// The product was deleted or is no longer active.
    Unavailable,

    /// Fewer units are in stock than the line requests.
    InsufficientStock,
}

/// A cart line that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCartItem {
    pub item: CartItemUuid,
    pub reason: InvalidItemReason,

    /// Units still in stock, for [`InvalidItemReason::InsufficientStock`].
    pub available_stock: Option<u64>,
}

impl fmt::Display for InvalidCartItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.reason, self.available_stock) {
            (InvalidItemReason::InsufficientStock, Some(stock)) => {
                write!(f, "Only {stock} items in stock")
            }
            (InvalidItemReason::InsufficientStock, None) => f.write_str("Not enough stock"),
            (InvalidItemReason::Unavailable, _) => f.write_str("Product no longer available"),
        }
    }
}
