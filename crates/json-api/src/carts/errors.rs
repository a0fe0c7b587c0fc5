//! Cart Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use storefront_app::domain::carts::CartsServiceError;

use crate::envelope::validation_failed;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::ItemNotFound => {
            StatusError::not_found().brief("Item not found in cart")
        }
        CartsServiceError::ProductUnavailable => {
            StatusError::not_found().brief("Product not found")
        }
        CartsServiceError::InvalidQuantity => {
            validation_failed(vec!["Quantity must be at least 1".to_string()])
        }
        CartsServiceError::InvalidCoupon(source) => validation_failed(vec![source.to_string()]),
        CartsServiceError::Pricing(source) => {
            warn!("failed to price cart: {source}");

            StatusError::unprocessable_entity().brief("Cart totals could not be calculated")
        }
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists"),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Sql(source) => {
            error!("carts storage error: {source}");

            StatusError::internal_server_error().brief("Internal server error")
        }
    }
}
