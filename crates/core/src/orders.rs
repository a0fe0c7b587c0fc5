//! Orders

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::pricing::CartTotals;

/// Errors parsing order values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Unknown status string.
    #[error("unknown order status: {0}")]
    UnknownStatus(String),
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Placed, awaiting processing.
    #[default]
    Pending,

    /// Being prepared.
    Processing,

    /// Handed to a carrier.
    Shipped,

    /// Received by the customer.
    Delivered,

    /// Cancelled before shipping.
    Cancelled,

    /// Refunded after payment.
    Refunded,

    /// Failed to complete.
    Failed,
}

impl OrderStatus {
    /// Persisted/wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "refunded" => Ok(OrderStatus::Refunded),
            "failed" => Ok(OrderStatus::Failed),
            other => Err(OrderError::UnknownStatus(other.to_string())),
        }
    }
}

/// Pricing snapshot stored on an order, in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderPricing {
    /// Sum of line totals
    pub subtotal: u64,

    /// Tax
    pub tax: u64,

    /// Shipping
    pub shipping: u64,

    /// Coupon discount
    pub discount: u64,

    /// Amount charged
    pub total: u64,
}

impl From<CartTotals> for OrderPricing {
    fn from(totals: CartTotals) -> Self {
        Self {
            subtotal: totals.total_price,
            tax: totals.estimated_tax,
            shipping: totals.estimated_shipping,
            discount: totals.discount,
            total: totals.estimated_total,
        }
    }
}

/// Formats an order number: `ORD-<unix millis>-<sequence>`, the sequence zero-padded to
/// four digits.
pub fn order_number(unix_millis: i64, sequence: u64) -> String {
    format!("ORD-{unix_millis}-{sequence:04}")
}
