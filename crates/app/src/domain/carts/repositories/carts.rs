//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::{coupons::Coupon, pricing::CartTotals};

use crate::domain::{
    amounts::{encode_amount, try_get_amount},
    carts::records::{CartRecord, CartUuid},
    users::records::UserUuid,
};

const ENSURE_CART_SQL: &str = include_str!("../sql/ensure_cart.sql");
const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const LOCK_CART_SQL: &str = include_str!("../sql/lock_cart.sql");
const UPDATE_CART_SQL: &str = include_str!("../sql/update_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Creates an empty cart for the user unless one already exists.
    pub(crate) async fn ensure_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(ENSURE_CART_SQL)
            .bind(CartUuid::new().into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// The user's cart, without its items.
    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(GET_CART_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// The user's cart, without its items, locked until the transaction ends.
    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LOCK_CART_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Stores the coupon and derived totals.
    pub(crate) async fn update_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        coupon: Option<&Coupon>,
        totals: &CartTotals,
    ) -> Result<CartRecord, sqlx::Error> {
        let discount = coupon.map(Coupon::discount);

        query_as::<Postgres, CartRecord>(UPDATE_CART_SQL)
            .bind(cart.into_uuid())
            .bind(coupon.map(Coupon::code))
            .bind(discount.map(|d| d.kind().as_str()))
            .bind(discount.map(|d| d.value()))
            .bind(encode_amount(totals.total_items)?)
            .bind(encode_amount(totals.total_price)?)
            .bind(encode_amount(totals.estimated_tax)?)
            .bind(encode_amount(totals.estimated_shipping)?)
            .bind(encode_amount(totals.discount)?)
            .bind(encode_amount(totals.estimated_total)?)
            .fetch_one(&mut **tx)
            .await
    }
}

fn try_get_coupon(row: &PgRow) -> Result<Option<Coupon>, sqlx::Error> {
    let code: Option<String> = row.try_get("coupon_code")?;
    let kind: Option<String> = row.try_get("coupon_kind")?;
    let value: Option<Decimal> = row.try_get("coupon_value")?;

    let (Some(code), Some(kind), Some(value)) = (code, kind, value) else {
        return Ok(None);
    };

    Coupon::from_parts(code, &kind, value)
        .map(Some)
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "coupon_kind".to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let totals = CartTotals {
            total_items: try_get_amount(row, "total_items")?,
            total_price: try_get_amount(row, "total_price")?,
            estimated_tax: try_get_amount(row, "estimated_tax")?,
            estimated_shipping: try_get_amount(row, "estimated_shipping")?,
            discount: try_get_amount(row, "discount")?,
            estimated_total: try_get_amount(row, "estimated_total")?,
        };

        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            items: Vec::new(),
            coupon: try_get_coupon(row)?,
            totals,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
