//! Review Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::reviews::ReviewsServiceError;

use crate::envelope::validation_failed;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        ReviewsServiceError::InvalidRating(source) => validation_failed(vec![source.to_string()]),
        ReviewsServiceError::InvalidComment => validation_failed(vec![
            "Comment must be between 1 and 500 characters".to_string(),
        ]),
        ReviewsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Review already exists")
        }
        ReviewsServiceError::InvalidReference
        | ReviewsServiceError::MissingRequiredData
        | ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid review payload")
        }
        ReviewsServiceError::Sql(source) => {
            error!("reviews storage error: {source}");

            StatusError::internal_server_error().brief("Internal server error")
        }
    }
}
