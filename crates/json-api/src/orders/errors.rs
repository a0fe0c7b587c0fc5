//! Order Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use storefront_app::domain::orders::OrdersServiceError;

use crate::carts;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::Cart(source) => carts::into_status_error(source),
        OrdersServiceError::Pricing(source) => {
            warn!("failed to price order: {source}");

            StatusError::unprocessable_entity().brief("Order totals could not be calculated")
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("orders storage error: {source}");

            StatusError::internal_server_error().brief("Internal server error")
        }
    }
}
