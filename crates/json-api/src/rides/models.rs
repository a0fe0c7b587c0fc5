//! Ride Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::rides::records::RideRecord;

/// Ride
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RideResponse {
    pub uuid: Uuid,
    pub from_location: String,
    pub to_location: String,
    pub departure_time: String,
    pub vehicle_type: String,
    pub total_seats: u8,
    pub available_seats: u8,
    pub is_active: bool,
    pub created_at: String,
}

impl From<RideRecord> for RideResponse {
    fn from(ride: RideRecord) -> Self {
        Self {
            uuid: ride.uuid.into_uuid(),
            from_location: ride.from_location,
            to_location: ride.to_location,
            departure_time: ride.departure_at.to_string(),
            vehicle_type: ride.vehicle_type,
            total_seats: ride.total_seats,
            available_seats: ride.available_seats,
            is_active: ride.is_active,
            created_at: ride.created_at.to_string(),
        }
    }
}
