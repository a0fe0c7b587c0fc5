//! Discount utilities
//!
//! Percentage arithmetic over minor units, shared by tax and coupon calculations.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors specific to percentage calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not representable")]
    PercentConversion,
}

/// Calculate a percentage of a minor unit amount, rounded to the nearest minor unit.
///
/// Midpoints round away from zero, so `0.5` cents becomes `1` cent.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] when the multiplication overflows or the
/// result cannot be represented as a `u64`.
pub fn percent_of_minor(percent: &Percentage, minor: u64) -> Result<u64, DiscountError> {
    // decimal_percentage does not expose the underlying Decimal
    fraction_of_minor((*percent) * Decimal::ONE, minor)
}

/// Calculate `points` percent (`15` meaning 15%) of a minor unit amount, rounded to the
/// nearest minor unit.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] when the multiplication overflows or the
/// result cannot be represented as a `u64`.
pub fn percent_points_of_minor(points: Decimal, minor: u64) -> Result<u64, DiscountError> {
    let fraction = points
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or(DiscountError::PercentConversion)?;

    fraction_of_minor(fraction, minor)
}

fn fraction_of_minor(fraction: Decimal, minor: u64) -> Result<u64, DiscountError> {
    let minor = Decimal::from_u64(minor).ok_or(DiscountError::PercentConversion)?;

    fraction
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(DiscountError::PercentConversion)
}
