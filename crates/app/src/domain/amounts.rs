//! Minor unit conversions between domain values and `BIGINT` columns.

use sqlx::{Row, postgres::PgRow};

pub(crate) fn encode_amount(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

pub(crate) fn decode_amount(column: &str, amount: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_amount(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    decode_amount(column, row.try_get(column)?)
}

pub(crate) fn try_get_optional_amount(
    row: &PgRow,
    column: &str,
) -> Result<Option<u64>, sqlx::Error> {
    row.try_get::<Option<i64>, _>(column)?
        .map(|amount| decode_amount(column, amount))
        .transpose()
}
