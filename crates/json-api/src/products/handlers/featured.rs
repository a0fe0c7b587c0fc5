//! Featured Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storefront_app::domain::{pagination::MAX_LIMIT, products::data::DEFAULT_FEATURED_LIMIT};

use crate::{
    envelope::Envelope,
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Featured Products Handler
///
/// Newest featured products, eight unless `limit` says otherwise.
#[endpoint(
    tags("products"),
    summary = "Featured Products",
    responses(
        (status_code = StatusCode::OK, description = "Featured products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ProductResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let limit = limit.into_inner().unwrap_or(DEFAULT_FEATURED_LIMIT);

    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(StatusError::bad_request().brief("Limit must be between 1 and 100"));
    }

    let products = state
        .app
        .products
        .featured_products(limit)
        .await
        .map_err(into_status_error)?;

    Ok(Json(Envelope::data(
        products.into_iter().map(Into::into).collect(),
    )))
}
