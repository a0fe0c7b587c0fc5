//! Reviews Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    products::records::ProductUuid,
    reviews::records::{ReviewRecord, ReviewUuid},
    users::records::UserUuid,
};

const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const PRODUCT_RATINGS_SQL: &str = include_str!("sql/product_ratings.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
        product: ProductUuid,
        user: UserUuid,
        rating: u8,
        comment: &str,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(CREATE_REVIEW_SQL)
            .bind(review.into_uuid())
            .bind(product.into_uuid())
            .bind(user.into_uuid())
            .bind(i16::from(rating))
            .bind(comment)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn product_ratings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<u8>, sqlx::Error> {
        let ratings = query_scalar::<Postgres, i16>(PRODUCT_RATINGS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        ratings.into_iter().map(decode_rating).collect()
    }
}

fn decode_rating(rating: i16) -> Result<u8, sqlx::Error> {
    u8::try_from(rating).map_err(|e| sqlx::Error::ColumnDecode {
        index: "rating".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ReviewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            rating: decode_rating(row.try_get("rating")?)?,
            comment: row.try_get("comment")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
