//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::carts::VariantBody;

/// Order line, as it was when the order was placed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product: Uuid,
    pub name: String,

    /// Unit price in minor units
    pub price: u64,
    pub quantity: u32,
    pub variant: VariantBody,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product: item.product.into_uuid(),
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            variant: item.variant.into(),
        }
    }
}

/// Order pricing, in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPricingResponse {
    pub subtotal: u64,
    pub tax: u64,
    pub shipping: u64,
    pub discount: u64,
    pub total: u64,
}

/// Order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub status: String,
    pub items: Vec<OrderItemResponse>,
    pub pricing: OrderPricingResponse,
    pub coupon_code: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            order_number: order.number,
            status: order.status.as_str().to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
            pricing: OrderPricingResponse {
                subtotal: order.pricing.subtotal,
                tax: order.pricing.tax,
                shipping: order.pricing.shipping,
                discount: order.pricing.discount,
                total: order.pricing.total,
            },
            coupon_code: order.coupon_code,
            notes: order.notes,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}
