//! List Rides Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{oapi::extract::QueryParam, prelude::*};
use tracing::debug;

use storefront_app::domain::rides::data::RideQuery;

use crate::{
    envelope::Envelope,
    extensions::*,
    rides::{errors::into_status_error, models::RideResponse},
    state::State,
};

/// List Rides Handler
///
/// Active rides, soonest departure first. `date` is a `YYYY-MM-DD` UTC day;
/// a value that does not parse is ignored.
#[endpoint(
    tags("rides"),
    summary = "List Rides",
    responses(
        (status_code = StatusCode::OK, description = "Rides"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    to: QueryParam<String, false>,
    date: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<RideResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let date = date.into_inner().and_then(|raw| match raw.parse::<Date>() {
        Ok(date) => Some(date),
        Err(source) => {
            debug!(date = %raw, "ignoring unparseable ride date: {source}");

            None
        }
    });

    let to = to
        .into_inner()
        .map(|to| to.trim().to_string())
        .filter(|to| !to.is_empty());

    let rides = state
        .app
        .rides
        .list_rides(RideQuery { to, date })
        .await
        .map_err(into_status_error)?;

    Ok(Json(Envelope::data(
        rides.into_iter().map(Into::into).collect(),
    )))
}
