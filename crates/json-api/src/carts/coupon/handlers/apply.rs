//! Apply Coupon Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::coupons::Coupon;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    envelope::{Envelope, validation_failed},
    extensions::*,
    state::State,
};

/// Apply Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyCouponRequest {
    pub code: String,

    /// `percentage` or `fixed`
    pub kind: String,

    /// Percentage points (`15` is 15% off), or minor units for fixed coupons
    #[salvo(schema(value_type = f64))]
    pub value: Decimal,
}

/// Apply Coupon Handler
///
/// Replaces any coupon already applied to the cart.
#[endpoint(
    tags("cart"),
    summary = "Apply Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon applied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid coupon"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authorized"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Totals could not be calculated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ApplyCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let coupon = Coupon::from_parts(request.code, &request.kind, request.value)
        .map_err(|error| validation_failed(vec![error.to_string()]))?;

    let cart = state
        .app
        .carts
        .apply_coupon(user, coupon)
        .await
        .map_err(into_status_error)?;

    Ok(Json(Envelope::data(cart.into()).message("Coupon applied")))
}
