//! Review Data

use crate::domain::{
    products::records::ProductUuid, reviews::records::ReviewUuid, users::records::UserUuid,
};

/// Longest accepted review comment, in characters.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// New Review Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub uuid: ReviewUuid,
    pub product: ProductUuid,
    pub user: UserUuid,

    /// Requested rating, validated to `1..=5`.
    pub rating: i64,
    pub comment: String,
}
