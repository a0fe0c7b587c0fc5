//! Category Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::categories::CategoriesServiceError;

pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Category already exists")
        }
        CategoriesServiceError::NotFound => StatusError::not_found().brief("Category not found"),
        CategoriesServiceError::ParentNotFound | CategoriesServiceError::InvalidReference => {
            StatusError::bad_request().brief("Parent category not found")
        }
        CategoriesServiceError::InvalidName => StatusError::bad_request()
            .brief("Category name must contain at least one letter or digit"),
        CategoriesServiceError::MissingRequiredData | CategoriesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid category payload")
        }
        CategoriesServiceError::Sql(source) => {
            error!("categories storage error: {source}");

            StatusError::internal_server_error().brief("Internal server error")
        }
    }
}
