//! Rides Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    rides::{
        data::NewRide,
        records::{RideRecord, RideUuid},
    },
    search::contains_pattern,
};

const LIST_RIDES_SQL: &str = include_str!("sql/list_rides.sql");
const CREATE_RIDE_SQL: &str = include_str!("sql/create_ride.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRidesRepository;

impl PgRidesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Active rides departing in `[from, until)`, soonest first.
    pub(crate) async fn list_rides(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        to: Option<&str>,
        from: Option<Timestamp>,
        until: Option<Timestamp>,
    ) -> Result<Vec<RideRecord>, sqlx::Error> {
        query_as::<Postgres, RideRecord>(LIST_RIDES_SQL)
            .bind(to.map(contains_pattern))
            .bind(from.map(SqlxTimestamp::from))
            .bind(until.map(SqlxTimestamp::from))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_ride(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ride: NewRide,
    ) -> Result<RideRecord, sqlx::Error> {
        query_as::<Postgres, RideRecord>(CREATE_RIDE_SQL)
            .bind(ride.uuid.into_uuid())
            .bind(ride.from_location)
            .bind(ride.to_location)
            .bind(SqlxTimestamp::from(ride.departure_at))
            .bind(ride.vehicle_type)
            .bind(i16::from(ride.total_seats))
            .fetch_one(&mut **tx)
            .await
    }
}

fn try_get_seats(row: &PgRow, column: &str) -> Result<u8, sqlx::Error> {
    let seats: i16 = row.try_get(column)?;

    u8::try_from(seats).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for RideRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RideUuid::from_uuid(row.try_get("uuid")?),
            from_location: row.try_get("from_location")?,
            to_location: row.try_get("to_location")?,
            departure_at: row.try_get::<SqlxTimestamp, _>("departure_at")?.to_jiff(),
            vehicle_type: row.try_get("vehicle_type")?,
            total_seats: try_get_seats(row, "total_seats")?,
            available_seats: try_get_seats(row, "available_seats")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
