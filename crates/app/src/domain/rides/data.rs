//! Ride Data

use jiff::{Timestamp, civil::Date};

use crate::domain::rides::records::RideUuid;

/// Shortest accepted location or vehicle type, in characters.
pub const MIN_LABEL_LENGTH: usize = 2;

/// Most seats a ride can offer.
pub const MAX_SEATS: u8 = 8;

/// New Ride Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewRide {
    pub uuid: RideUuid,
    pub from_location: String,
    pub to_location: String,
    pub departure_at: Timestamp,
    pub vehicle_type: String,
    pub total_seats: u8,
}

/// Ride search. Only active rides are returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RideQuery {
    /// Case-insensitive substring of the destination.
    pub to: Option<String>,

    /// UTC calendar day of departure.
    pub date: Option<Date>,
}
