//! Ratings

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Lowest accepted review rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted review rating.
pub const MAX_RATING: u8 = 5;

/// Errors raised for review ratings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    /// Rating outside `1..=5`.
    #[error("rating must be between 1 and 5, got {0}")]
    OutOfRange(i64),
}

/// Validates a review rating.
///
/// # Errors
///
/// Returns [`RatingError::OutOfRange`] when the rating is outside `1..=5`.
pub fn validate_rating(rating: i64) -> Result<u8, RatingError> {
    u8::try_from(rating)
        .ok()
        .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
        .ok_or(RatingError::OutOfRange(rating))
}

/// Aggregate rating of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingSummary {
    /// Mean rating rounded to one decimal place, zero when unrated.
    pub average: Decimal,

    /// Number of ratings.
    pub count: u64,
}

/// Summarises a set of ratings.
pub fn summarize<I>(ratings: I) -> RatingSummary
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0_u64, 0_u64), |(sum, count), rating| {
            (
                sum.saturating_add(u64::from(rating)),
                count.saturating_add(1),
            )
        });

    let average = Decimal::from(sum)
        .checked_div(Decimal::from(count))
        .map_or(Decimal::ZERO, |mean| {
            mean.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        });

    RatingSummary { average, count }
}
