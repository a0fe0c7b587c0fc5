//! Validate Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, models::InvalidItemResponse},
    envelope::Envelope,
    extensions::*,
    state::State,
};

/// Cart Validation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartValidationResponse {
    /// Whether every line can be ordered as it stands
    pub is_valid: bool,
    pub invalid_items: Vec<InvalidItemResponse>,
}

/// Validate Cart Handler
///
/// Reports lines whose product is no longer sold or lacks the stock to cover them.
#[endpoint(
    tags("cart"),
    summary = "Validate Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Validation report"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<CartValidationResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let invalid_items: Vec<InvalidItemResponse> = state
        .app
        .carts
        .validate_items(user)
        .await
        .map_err(into_status_error)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(Envelope::data(CartValidationResponse {
        is_valid: invalid_items.is_empty(),
        invalid_items,
    })))
}
