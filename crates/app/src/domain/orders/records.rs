//! Order Records

use jiff::Timestamp;
use storefront::{
    items::Variant,
    orders::{OrderPricing, OrderStatus},
};

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,

    /// Customer facing reference, `ORD-<millis>-<sequence>`.
    pub number: String,
    pub user: UserUuid,
    pub status: OrderStatus,
    pub items: Vec<OrderItemRecord>,
    pub pricing: OrderPricing,
    pub coupon_code: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Snapshot of a cart line at the time the order was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub product: ProductUuid,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub variant: Variant,
}
