//! Review Records

use jiff::Timestamp;
use storefront::ratings::RatingSummary;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

/// Review Record
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub product: ProductUuid,
    pub user: UserUuid,
    pub rating: u8,
    pub comment: String,
    pub created_at: Timestamp,
}

/// A stored review together with the product's recomputed rating.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub review: ReviewRecord,
    pub product_rating: RatingSummary,
}
