//! Rides service.

use async_trait::async_trait;
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use mockall::automock;

use crate::{
    database::Db,
    domain::rides::{
        data::{MAX_SEATS, MIN_LABEL_LENGTH, NewRide, RideQuery},
        errors::RidesServiceError,
        records::RideRecord,
        repository::PgRidesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgRidesService {
    db: Db,
    repository: PgRidesRepository,
}

impl PgRidesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgRidesRepository::new(),
        }
    }
}

/// Start of the given UTC day and of the day after it.
fn utc_day_bounds(date: Date) -> Result<(Timestamp, Timestamp), RidesServiceError> {
    let start = date
        .to_zoned(TimeZone::UTC)
        .map_err(RidesServiceError::InvalidDate)?;

    let end = start.tomorrow().map_err(RidesServiceError::InvalidDate)?;

    Ok((start.timestamp(), end.timestamp()))
}

fn validate_label(field: &'static str, value: String) -> Result<String, RidesServiceError> {
    let value = value.trim().to_string();

    if value.chars().count() < MIN_LABEL_LENGTH {
        return Err(RidesServiceError::LabelTooShort(field));
    }

    Ok(value)
}

#[async_trait]
impl RidesService for PgRidesService {
    async fn list_rides(&self, query: RideQuery) -> Result<Vec<RideRecord>, RidesServiceError> {
        let (from, until) = match query.date {
            Some(date) => {
                let (start, end) = utc_day_bounds(date)?;

                (Some(start), Some(end))
            }
            None => (None, None),
        };

        let to = query.to.as_deref().map(str::trim).filter(|to| !to.is_empty());

        let mut tx = self.db.begin_transaction().await?;

        let rides = self.repository.list_rides(&mut tx, to, from, until).await?;

        tx.commit().await?;

        Ok(rides)
    }

    async fn create_ride(&self, ride: NewRide) -> Result<RideRecord, RidesServiceError> {
        if !(1..=MAX_SEATS).contains(&ride.total_seats) {
            return Err(RidesServiceError::InvalidSeats(ride.total_seats));
        }

        let ride = NewRide {
            from_location: validate_label("from location", ride.from_location)?,
            to_location: validate_label("to location", ride.to_location)?,
            vehicle_type: validate_label("vehicle type", ride.vehicle_type)?,
            ..ride
        };

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_ride(&mut tx, ride).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait RidesService: Send + Sync {
    /// Active rides matching the query, soonest departure first.
    async fn list_rides(&self, query: RideQuery) -> Result<Vec<RideRecord>, RidesServiceError>;

    /// Offers a ride with every seat available.
    async fn create_ride(&self, ride: NewRide) -> Result<RideRecord, RidesServiceError>;
}
