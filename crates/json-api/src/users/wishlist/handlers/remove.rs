//! Remove From Wishlist Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::Envelope, extensions::*, products::models::ProductResponse, state::State,
    users::into_status_error,
};

/// Remove From Wishlist Handler
///
/// Removing a product that is not wishlisted leaves the list unchanged.
#[endpoint(
    tags("users"),
    summary = "Remove From Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated wishlist"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "users.wishlist.remove", skip(product, depot), err)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ProductResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let wishlist = state
        .app
        .users
        .remove_from_wishlist(user, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        Envelope::data(wishlist.into_iter().map(Into::into).collect())
            .message("Product removed from wishlist"),
    ))
}
