//! Cart Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront::{coupons::Coupon, items::Variant};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartItemRecord, CartRecord, InvalidCartItem};

/// Variant selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

impl From<VariantBody> for Variant {
    fn from(body: VariantBody) -> Self {
        Variant {
            size: body.size,
            color: body.color,
            sku: body.sku,
        }
    }
}

impl From<Variant> for VariantBody {
    fn from(variant: Variant) -> Self {
        Self {
            size: variant.size,
            color: variant.color,
            sku: variant.sku,
        }
    }
}

/// Cart line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product: Uuid,
    pub variant: VariantBody,
    pub quantity: u32,

    /// Unit price captured when the product was added, in minor units
    pub price: u64,
    pub added_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product: item.product.into_uuid(),
            variant: item.variant.into(),
            quantity: item.quantity,
            price: item.unit_price,
            added_at: item.created_at.to_string(),
        }
    }
}

/// Applied coupon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    pub code: String,

    /// `percentage` or `fixed`
    pub kind: String,

    /// Percentage points, or minor units for fixed coupons, as a decimal string
    pub value: String,
}

impl From<&Coupon> for CouponResponse {
    fn from(coupon: &Coupon) -> Self {
        let discount = coupon.discount();

        Self {
            code: coupon.code().to_string(),
            kind: discount.kind().as_str().to_string(),
            value: discount.value().to_string(),
        }
    }
}

/// Cart
///
/// Totals are in minor units and always reflect the current items and coupon.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub items: Vec<CartItemResponse>,
    pub applied_coupon: Option<CouponResponse>,
    pub total_items: u64,
    pub total_price: u64,
    pub estimated_tax: u64,
    pub estimated_shipping: u64,
    pub discount: u64,
    pub estimated_total: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            applied_coupon: cart.coupon.as_ref().map(Into::into),
            items: cart.items.into_iter().map(Into::into).collect(),
            total_items: cart.totals.total_items,
            total_price: cart.totals.total_price,
            estimated_tax: cart.totals.estimated_tax,
            estimated_shipping: cart.totals.estimated_shipping,
            discount: cart.totals.discount,
            estimated_total: cart.totals.estimated_total,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// A cart line that can no longer be bought as it stands
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvalidItemResponse {
    pub item: Uuid,
    pub reason: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_stock: Option<u64>,
}

impl From<InvalidCartItem> for InvalidItemResponse {
    fn from(invalid: InvalidCartItem) -> Self {
        Self {
            reason: invalid.to_string(),
            item: invalid.item.into_uuid(),
            available_stock: invalid.available_stock,
        }
    }
}
