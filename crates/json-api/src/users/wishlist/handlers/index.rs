//! Wishlist Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::Envelope, extensions::*, products::models::ProductResponse, state::State,
    users::into_status_error,
};

/// Wishlist Handler
///
/// Products on the authenticated user's wishlist, in the order they were added.
#[endpoint(
    tags("users"),
    summary = "Get Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Wishlisted products"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ProductResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let wishlist = state
        .app
        .users
        .get_wishlist(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(Envelope::data(
        wishlist.into_iter().map(Into::into).collect(),
    )))
}
