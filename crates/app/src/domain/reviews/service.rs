//! Reviews service.

use async_trait::async_trait;
use mockall::automock;
use storefront::ratings::{summarize, validate_rating};

use crate::{
    database::Db,
    domain::{
        products::repository::PgProductsRepository,
        reviews::{
            data::{MAX_COMMENT_LENGTH, NewReview},
            errors::ReviewsServiceError,
            records::ReviewOutcome,
            repository::PgReviewsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    reviews_repository: PgReviewsRepository,
    products_repository: PgProductsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            reviews_repository: PgReviewsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn add_review(&self, review: NewReview) -> Result<ReviewOutcome, ReviewsServiceError> {
        let rating = validate_rating(review.rating)?;
        let comment = review.comment.trim();

        if comment.is_empty() || comment.chars().count() > MAX_COMMENT_LENGTH {
            return Err(ReviewsServiceError::InvalidComment);
        }

        let mut tx = self.db.begin_transaction().await?;

        // Serialises concurrent reviews of the same product so the aggregate stays exact
        let product = self
            .products_repository
            .lock_product(&mut tx, review.product)
            .await?;

        let stored = self
            .reviews_repository
            .create_review(&mut tx, review.uuid, product.uuid, review.user, rating, comment)
            .await?;

        let ratings = self
            .reviews_repository
            .product_ratings(&mut tx, product.uuid)
            .await?;

        let product_rating = summarize(ratings);

        self.products_repository
            .update_rating(
                &mut tx,
                product.uuid,
                product_rating.average,
                product_rating.count,
            )
            .await?;

        tx.commit().await?;

        tracing::debug!(
            product = %product.uuid,
            average = %product_rating.average,
            count = product_rating.count,
            "recomputed product rating"
        );

        Ok(ReviewOutcome {
            review: stored,
            product_rating,
        })
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Stores a review and recomputes the product's rating average and count.
    async fn add_review(&self, review: NewReview) -> Result<ReviewOutcome, ReviewsServiceError>;
}
