//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::{
    items::{LineItem, Variant},
    products::ProductStatus,
};
use uuid::Uuid;

use crate::domain::{
    amounts::{encode_amount, try_get_amount},
    carts::records::{CartItemRecord, CartItemUuid, CartUuid},
    products::records::ProductUuid,
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const PRUNE_CART_ITEMS_SQL: &str = include_str!("../sql/prune_cart_items.sql");
const CART_ITEM_AVAILABILITY_SQL: &str = include_str!("../sql/cart_item_availability.sql");

/// Current catalogue state of the product behind a cart line.
#[derive(Debug, Clone)]
pub(crate) struct ItemAvailability {
    pub(crate) item: CartItemUuid,
    pub(crate) quantity: u32,
    pub(crate) status: ProductStatus,
    pub(crate) stock: u64,
    pub(crate) track_quantity: bool,
    pub(crate) deleted: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Makes the stored lines of a cart match `items`, in order.
    ///
    /// Existing lines keep their identity and creation time; lines missing from `items` are
    /// deleted.
    pub(crate) async fn sync_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        items: &[LineItem],
    ) -> Result<(), sqlx::Error> {
        let keep: Vec<Uuid> = items.iter().map(LineItem::uuid).collect();

        query(PRUNE_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .bind(keep)
            .execute(&mut **tx)
            .await?;

        for (position, item) in items.iter().enumerate() {
            let position = i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            let quantity =
                i32::try_from(item.quantity()).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

            let variant = item.variant();

            query(UPSERT_CART_ITEM_SQL)
                .bind(item.uuid())
                .bind(cart.into_uuid())
                .bind(item.product())
                .bind(position)
                .bind(variant.size.as_deref())
                .bind(variant.color.as_deref())
                .bind(variant.sku.as_deref())
                .bind(quantity)
                .bind(encode_amount(item.unit_price())?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn item_availability(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<ItemAvailability>, sqlx::Error> {
        query_as::<Postgres, ItemAvailability>(CART_ITEM_AVAILABILITY_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

pub(crate) fn try_get_quantity(row: &PgRow) -> Result<u32, sqlx::Error> {
    let quantity: i32 = row.try_get("quantity")?;

    u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: "quantity".to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_variant(row: &PgRow) -> Result<Variant, sqlx::Error> {
    Ok(Variant {
        size: row.try_get("size")?,
        color: row.try_get("color")?,
        sku: row.try_get("sku")?,
    })
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            variant: try_get_variant(row)?,
            quantity: try_get_quantity(row)?,
            unit_price: try_get_amount(row, "unit_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ItemAvailability {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<ProductStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            item: CartItemUuid::from_uuid(row.try_get("uuid")?),
            quantity: try_get_quantity(row)?,
            status,
            stock: try_get_amount(row, "stock")?,
            track_quantity: row.try_get("track_quantity")?,
            deleted: row.try_get("deleted")?,
        })
    }
}
