//! Coupons

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

use crate::discounts::{DiscountError, percent_points_of_minor};

/// Errors raised when constructing a coupon.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    /// Coupon code was empty or whitespace.
    #[error("coupon code cannot be empty")]
    EmptyCode,

    /// Percentage discount outside `0..=100`.
    #[error("percentage discount must be between 0 and 100, got {0}")]
    PercentageOutOfRange(Decimal),

    /// Unknown discount kind.
    #[error("unknown discount kind: {0}")]
    UnknownKind(String),

    /// Percentage discount with more than two decimal places.
    #[error("percentage discount allows at most 2 decimal places, got {0}")]
    PercentagePrecision(Decimal),

    /// Fixed amount was not a whole number of minor units.
    #[error("fixed discount must be a non-negative whole number of minor units, got {0}")]
    InvalidAmount(Decimal),

    /// Fixed amount larger than [`MAX_FIXED_AMOUNT`].
    #[error("fixed discount cannot exceed {max} minor units, got {0}", max = MAX_FIXED_AMOUNT)]
    AmountTooLarge(u64),
}

/// Decimal places allowed on a percentage discount.
pub const PERCENTAGE_SCALE: u32 = 2;

/// Largest fixed discount, in minor units. Cart amounts are stored as signed 64-bit integers.
pub const MAX_FIXED_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// Coupon discount kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CouponKind {
    /// Percentage of the cart subtotal.
    Percentage,

    /// Fixed amount in minor units.
    Fixed,
}

impl CouponKind {
    /// Persisted/wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            CouponKind::Percentage => "percentage",
            CouponKind::Fixed => "fixed",
        }
    }
}

impl fmt::Display for CouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CouponKind {
    type Err = CouponError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(CouponKind::Percentage),
            "fixed" => Ok(CouponKind::Fixed),
            other => Err(CouponError::UnknownKind(other.to_string())),
        }
    }
}

/// Discount magnitude of a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponDiscount {
    /// Percentage points off the subtotal (`15` is 15% off).
    Percentage(Decimal),

    /// Fixed amount off the total, in minor units.
    Fixed(u64),
}

impl CouponDiscount {
    /// Kind of this discount.
    pub fn kind(&self) -> CouponKind {
        match self {
            CouponDiscount::Percentage(_) => CouponKind::Percentage,
            CouponDiscount::Fixed(_) => CouponKind::Fixed,
        }
    }

    /// Magnitude as a decimal: percentage points or minor units.
    pub fn value(&self) -> Decimal {
        match self {
            CouponDiscount::Percentage(points) => *points,
            CouponDiscount::Fixed(amount) => Decimal::from(*amount),
        }
    }
}

/// A discount descriptor applied to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    code: String,
    discount: CouponDiscount,
}

impl Coupon {
    /// Creates a validated coupon.
    ///
    /// # Errors
    ///
    /// - [`CouponError::EmptyCode`]: the code is blank.
    /// - [`CouponError::PercentageOutOfRange`]: a percentage outside `0..=100`.
    /// - [`CouponError::PercentagePrecision`]: a percentage finer than hundredths.
    /// - [`CouponError::AmountTooLarge`]: a fixed amount over [`MAX_FIXED_AMOUNT`].
    pub fn new(code: impl Into<String>, discount: CouponDiscount) -> Result<Self, CouponError> {
        let code = code.into().trim().to_string();

        if code.is_empty() {
            return Err(CouponError::EmptyCode);
        }

        match discount {
            CouponDiscount::Percentage(points) => {
                if points < Decimal::ZERO || points > Decimal::ONE_HUNDRED {
                    return Err(CouponError::PercentageOutOfRange(points));
                }

                // Trailing zeros don't count: 12.500 is 12.5
                if points.normalize().scale() > PERCENTAGE_SCALE {
                    return Err(CouponError::PercentagePrecision(points));
                }
            }
            CouponDiscount::Fixed(amount) => {
                if amount > MAX_FIXED_AMOUNT {
                    return Err(CouponError::AmountTooLarge(amount));
                }
            }
        }

        Ok(Self { code, discount })
    }

    /// Builds a coupon from its persisted parts: code, kind and magnitude.
    ///
    /// # Errors
    ///
    /// Returns a [`CouponError`] if the kind is unknown, a fixed amount is fractional or
    /// negative, or [`Coupon::new`] rejects the values.
    pub fn from_parts(
        code: impl Into<String>,
        kind: &str,
        value: Decimal,
    ) -> Result<Self, CouponError> {
        let discount = match kind.parse::<CouponKind>()? {
            CouponKind::Percentage => CouponDiscount::Percentage(value),
            CouponKind::Fixed => {
                if !value.fract().is_zero() {
                    return Err(CouponError::InvalidAmount(value));
                }

                let amount = value.to_u64().ok_or(CouponError::InvalidAmount(value))?;

                CouponDiscount::Fixed(amount)
            }
        };

        Self::new(code, discount)
    }

    /// Coupon code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Discount magnitude and kind
    pub fn discount(&self) -> CouponDiscount {
        self.discount
    }

    /// Discount this coupon grants on a subtotal, in minor units.
    ///
    /// Percentage discounts are rounded to the nearest minor unit. Fixed discounts are
    /// returned as-is, even when larger than the subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentConversion`] if the percentage cannot be applied.
    pub fn discount_on(&self, subtotal: u64) -> Result<u64, DiscountError> {
        match self.discount {
            CouponDiscount::Percentage(points) => percent_points_of_minor(points, subtotal),
            CouponDiscount::Fixed(amount) => Ok(amount),
        }
    }
}
