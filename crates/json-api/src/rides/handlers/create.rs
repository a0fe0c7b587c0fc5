//! Create Ride Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::rides::{data::NewRide, records::RideUuid};

use crate::{
    envelope::{Envelope, validation_failed},
    extensions::*,
    rides::{errors::into_status_error, models::RideResponse},
    state::State,
};

/// Create Ride Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateRideRequest {
    pub from_location: String,
    pub to_location: String,

    /// RFC 3339 timestamp
    pub departure_time: String,
    pub vehicle_type: String,
    pub total_seats: u8,
}

/// Create Ride Handler
///
/// Every seat starts out available.
#[endpoint(
    tags("rides"),
    summary = "Create Ride",
    responses(
        (status_code = StatusCode::CREATED, description = "Ride created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "rides.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateRideRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<RideResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let departure_at = request
        .departure_time
        .parse::<Timestamp>()
        .map_err(|_ignored| {
            validation_failed(vec!["Departure time must be a valid date".to_string()])
        })?;

    let ride = state
        .app
        .rides
        .create_ride(NewRide {
            uuid: RideUuid::new(),
            from_location: request.from_location,
            to_location: request.to_location,
            departure_at,
            vehicle_type: request.vehicle_type,
            total_seats: request.total_seats,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/rides/{}", ride.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(
        Envelope::data(ride.into()).message("Ride created successfully"),
    ))
}
