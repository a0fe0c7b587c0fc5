//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use storefront::orders::{OrderPricing, OrderStatus};
use uuid::Uuid;

use crate::domain::{
    amounts::{decode_amount, encode_amount, try_get_amount},
    carts::{
        records::CartUuid,
        repositories::{try_get_quantity, try_get_variant},
    },
    orders::records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
    products::records::ProductUuid,
    users::records::UserUuid,
};

const NEXT_ORDER_SEQUENCE_SQL: &str = include_str!("sql/next_order_sequence.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const CART_LINES_SQL: &str = include_str!("sql/cart_lines.sql");

/// A stored order line together with the order it belongs to.
pub(crate) struct StoredOrderItem {
    pub(crate) order: OrderUuid,
    pub(crate) item: OrderItemRecord,
}

/// Header values of an order about to be written.
pub(crate) struct OrderHeader<'a> {
    pub(crate) uuid: OrderUuid,
    pub(crate) number: &'a str,
    pub(crate) user: UserUuid,
    pub(crate) coupon_code: Option<&'a str>,
    pub(crate) notes: Option<&'a str>,
    pub(crate) pricing: OrderPricing,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn next_sequence(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let sequence = query_scalar::<Postgres, i64>(NEXT_ORDER_SEQUENCE_SQL)
            .fetch_one(&mut **tx)
            .await?;

        decode_amount("nextval", sequence)
    }

    /// Snapshots the lines of a cart with their product names, in cart order.
    pub(crate) async fn cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CART_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderHeader<'_>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.number)
            .bind(order.user.into_uuid())
            .bind(OrderStatus::Pending.as_str())
            .bind(order.coupon_code)
            .bind(order.notes)
            .bind(encode_amount(order.pricing.subtotal)?)
            .bind(encode_amount(order.pricing.tax)?)
            .bind(encode_amount(order.pricing.shipping)?)
            .bind(encode_amount(order.pricing.discount)?)
            .bind(encode_amount(order.pricing.total)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: &[OrderItemRecord],
    ) -> Result<(), sqlx::Error> {
        for (position, item) in items.iter().enumerate() {
            let position = i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            let quantity =
                i32::try_from(item.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

            query(CREATE_ORDER_ITEM_SQL)
                .bind(item.uuid.into_uuid())
                .bind(order.into_uuid())
                .bind(item.product.into_uuid())
                .bind(position)
                .bind(&item.name)
                .bind(encode_amount(item.price)?)
                .bind(quantity)
                .bind(item.variant.size.as_deref())
                .bind(item.variant.color.as_deref())
                .bind(item.variant.sku.as_deref())
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    /// The user's orders, newest first, without their items.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<StoredOrderItem>, sqlx::Error> {
        let orders: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        query_as::<Postgres, StoredOrderItem>(LIST_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }
}

fn order_item_from_row(row: &PgRow, uuid: OrderItemUuid) -> Result<OrderItemRecord, sqlx::Error> {
    Ok(OrderItemRecord {
        uuid,
        product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
        name: row.try_get("name")?,
        price: try_get_amount(row, "price")?,
        quantity: try_get_quantity(row)?,
        variant: try_get_variant(row)?,
    })
}

// Cart lines have no order item identity yet, so each gets a fresh one.
impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        order_item_from_row(row, OrderItemUuid::new())
    }
}

impl<'r> FromRow<'r, PgRow> for StoredOrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            item: order_item_from_row(row, OrderItemUuid::from_uuid(row.try_get("uuid")?))?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        let pricing = OrderPricing {
            subtotal: try_get_amount(row, "subtotal")?,
            tax: try_get_amount(row, "tax")?,
            shipping: try_get_amount(row, "shipping")?,
            discount: try_get_amount(row, "discount")?,
            total: try_get_amount(row, "total")?,
        };

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            number: row.try_get("order_number")?,
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            status,
            items: Vec::new(),
            pricing,
            coupon_code: row.try_get("coupon_code")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
