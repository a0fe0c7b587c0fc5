//! Ride Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::rides::RidesServiceError;

use crate::envelope::validation_failed;

pub(crate) fn into_status_error(error: RidesServiceError) -> StatusError {
    match error {
        RidesServiceError::LabelTooShort(_) | RidesServiceError::InvalidSeats(_) => {
            validation_failed(vec![error.to_string()])
        }
        RidesServiceError::InvalidDate(source) => {
            validation_failed(vec![format!("Departure time is out of range: {source}")])
        }
        RidesServiceError::AlreadyExists => StatusError::conflict().brief("Ride already exists"),
        RidesServiceError::MissingRequiredData | RidesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid ride payload")
        }
        RidesServiceError::Sql(source) => {
            error!("rides storage error: {source}");

            StatusError::internal_server_error().brief("Internal server error")
        }
    }
}
