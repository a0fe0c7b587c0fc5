//! Pricing
//!
//! Cart totals are a pure function of the cart's line items and its optional coupon. Every
//! cart mutation in the storefront recomputes them through [`calculate_totals`]; nothing
//! writes the derived figures directly.

use decimal_percentage::Percentage;
use thiserror::Error;

use crate::{
    coupons::Coupon,
    discounts::{DiscountError, percent_of_minor},
    items::LineItem,
};

/// Free shipping applies from this subtotal (50.00) upwards.
pub const FREE_SHIPPING_THRESHOLD: u64 = 50_00;

/// Shipping charged below the free shipping threshold (9.99).
pub const FLAT_SHIPPING: u64 = 9_99;

/// Errors that can occur while calculating cart totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Minor unit arithmetic overflowed.
    #[error("cart totals overflowed")]
    Overflow,

    /// A percentage (tax or coupon) could not be applied.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Tax and shipping rules applied when computing totals.
#[derive(Debug, Clone, Copy)]
pub struct PricingPolicy {
    /// Tax rate applied to the subtotal.
    pub tax_rate: Percentage,

    /// Subtotal from which shipping is free, in minor units.
    pub free_shipping_threshold: u64,

    /// Shipping charged below the threshold, in minor units.
    pub flat_shipping: u64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Percentage::from(0.08),
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            flat_shipping: FLAT_SHIPPING,
        }
    }
}

/// Derived cart figures, all in minor units except `total_items`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line quantities.
    pub total_items: u64,

    /// Sum of unit price multiplied by quantity.
    pub total_price: u64,

    /// Tax on the subtotal, rounded to the minor unit.
    pub estimated_tax: u64,

    /// Shipping charge for the subtotal.
    pub estimated_shipping: u64,

    /// Discount granted by the applied coupon.
    pub discount: u64,

    /// Subtotal plus tax plus shipping, less the discount, floored at zero.
    pub estimated_total: u64,
}

/// Computes cart totals for the given lines and optional coupon.
///
/// An empty cart yields all-zero totals, including shipping, and ignores any coupon.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: minor unit arithmetic overflowed.
/// - [`PricingError::Discount`]: the tax rate or coupon percentage could not be applied.
pub fn calculate_totals(
    items: &[LineItem],
    coupon: Option<&Coupon>,
    policy: &PricingPolicy,
) -> Result<CartTotals, PricingError> {
    if items.is_empty() {
        return Ok(CartTotals::default());
    }

    let total_items = items.iter().try_fold(0_u64, |acc, item| {
        acc.checked_add(u64::from(item.quantity()))
            .ok_or(PricingError::Overflow)
    })?;

    let total_price = items.iter().try_fold(0_u64, |acc, item| {
        item.line_total()
            .and_then(|line| acc.checked_add(line))
            .ok_or(PricingError::Overflow)
    })?;

    let estimated_tax = percent_of_minor(&policy.tax_rate, total_price)?;

    let estimated_shipping = if total_price >= policy.free_shipping_threshold {
        0
    } else {
        policy.flat_shipping
    };

    let discount = coupon
        .map(|coupon| coupon.discount_on(total_price))
        .transpose()?
        .unwrap_or(0);

    let estimated_total = total_price
        .checked_add(estimated_tax)
        .and_then(|sum| sum.checked_add(estimated_shipping))
        .ok_or(PricingError::Overflow)?
        .saturating_sub(discount);

    Ok(CartTotals {
        total_items,
        total_price,
        estimated_tax,
        estimated_shipping,
        discount,
        estimated_total,
    })
}
