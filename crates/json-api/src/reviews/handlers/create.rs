//! Add Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::reviews::{
    data::NewReview,
    records::{ReviewOutcome, ReviewUuid},
};

use crate::{
    envelope::Envelope, extensions::*, products::models::RatingResponse,
    reviews::errors::into_status_error, state::State,
};

/// Add Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddReviewRequest {
    /// Whole stars, 1 to 5
    pub rating: i64,
    pub comment: String,
}

/// Review
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewResponse {
    pub uuid: Uuid,
    pub product: Uuid,
    pub user: Uuid,
    pub rating: u8,
    pub comment: String,
    pub created_at: String,
}

/// Added Review Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewAddedResponse {
    pub review: ReviewResponse,

    /// The product's rating including this review
    pub product_rating: RatingResponse,
}

impl From<ReviewOutcome> for ReviewAddedResponse {
    fn from(outcome: ReviewOutcome) -> Self {
        let review = outcome.review;

        Self {
            review: ReviewResponse {
                uuid: review.uuid.into_uuid(),
                product: review.product.into_uuid(),
                user: review.user.into_uuid(),
                rating: review.rating,
                comment: review.comment,
                created_at: review.created_at.to_string(),
            },
            product_rating: outcome.product_rating.into(),
        }
    }
}

/// Add Review Handler
///
/// Stores the review and recomputes the product's rating average and count.
#[endpoint(
    tags("reviews"),
    summary = "Add Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "reviews.create", skip(product, json, depot, res), err)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<AddReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<ReviewAddedResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let outcome = state
        .app
        .reviews
        .add_review(NewReview {
            uuid: ReviewUuid::new(),
            product: product.into_inner().into(),
            user,
            rating: request.rating,
            comment: request.comment,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(
        Envelope::data(outcome.into()).message("Review added successfully"),
    ))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront::ratings::{RatingError, RatingSummary};
    use testresult::TestResult;

    use storefront_app::domain::{
        products::records::ProductUuid,
        reviews::{MockReviewsService, ReviewsServiceError, records::ReviewRecord},
    };

    use crate::{
        envelope::ErrorEnvelope,
        test_helpers::{Mocks, TEST_USER_UUID, timestamp},
    };

    use super::*;

    fn make_service(reviews: MockReviewsService) -> Service {
        Mocks {
            reviews,
            ..Mocks::default()
        }
        .service(Router::with_path("reviews/{product}").post(handler))
    }

    #[tokio::test]
    async fn test_add_review_returns_new_rating() -> TestResult {
        let product = ProductUuid::new();

        let mut reviews = MockReviewsService::new();

        reviews
            .expect_add_review()
            .once()
            .withf(move |review| {
                review.product == product
                    && review.user == TEST_USER_UUID
                    && review.rating == 4
                    && review.comment == "Holds a lot"
            })
            .return_once(|review| {
                Ok(ReviewOutcome {
                    review: ReviewRecord {
                        uuid: review.uuid,
                        product: review.product,
                        user: review.user,
                        rating: 4,
                        comment: review.comment,
                        created_at: timestamp(),
                    },
                    product_rating: RatingSummary {
                        average: Decimal::new(45, 1),
                        count: 2,
                    },
                })
            });

        let mut res = TestClient::post(format!("http://example.com/reviews/{product}"))
            .json(&json!({ "rating": 4, "comment": "Holds a lot" }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: Envelope<ReviewAddedResponse> = res.take_json().await?;

        assert_eq!(body.message.as_deref(), Some("Review added successfully"));

        let added = body.data.ok_or("missing review")?;

        assert_eq!(
            added.product_rating,
            RatingResponse {
                average: "4.5".to_string(),
                count: 2,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_add_review_unknown_product_returns_404() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_add_review()
            .once()
            .return_once(|_| Err(ReviewsServiceError::ProductNotFound));

        let mut res = TestClient::post(format!("http://example.com/reviews/{}", Uuid::now_v7()))
            .json(&json!({ "rating": 5, "comment": "Great" }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(body.message, "Product not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_review_out_of_range_rating_returns_400() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_add_review()
            .once()
            .return_once(|_| Err(ReviewsServiceError::InvalidRating(RatingError::OutOfRange(9))));

        let res = TestClient::post(format!("http://example.com/reviews/{}", Uuid::now_v7()))
            .json(&json!({ "rating": 9, "comment": "Too good" }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
