//! Ride Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Ride UUID
pub type RideUuid = TypedUuid<RideRecord>;

/// Ride Record
#[derive(Debug, Clone)]
pub struct RideRecord {
    pub uuid: RideUuid,
    pub from_location: String,
    pub to_location: String,
    pub departure_at: Timestamp,
    pub vehicle_type: String,
    pub total_seats: u8,
    pub available_seats: u8,
    pub is_active: bool,
    pub created_at: Timestamp,
}
