//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use storefront::orders::{OrderPricing, order_number};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::PgCartsService,
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            repository::{OrderHeader, PgOrdersRepository},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    carts: PgCartsService,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            carts: PgCartsService::new(db.clone()),
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self.repository.list_orders(&mut tx, user).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let stored = self.repository.list_order_items(&mut tx, &uuids).await?;

        tx.commit().await?;

        let mut items: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for stored in stored {
            items.entry(stored.order).or_default().push(stored.item);
        }

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, order),
        fields(
            user_uuid = %user,
            order_uuid = %order.uuid,
            order_number = tracing::field::Empty,
            line_count = tracing::field::Empty
        ),
        err
    )]
    async fn place_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let (cart_record, mut cart) = self.carts.load_for_update(&mut tx, user).await?;

        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let pricing = OrderPricing::from(cart.totals(&self.carts.policy())?);

        let lines = self.repository.cart_lines(&mut tx, cart_record.uuid).await?;

        let sequence = self.repository.next_sequence(&mut tx).await?;
        let number = order_number(Timestamp::now().as_millisecond(), sequence);

        let span = Span::current();

        span.record("order_number", tracing::field::display(&number));
        span.record("line_count", tracing::field::display(lines.len()));

        let mut placed = self
            .repository
            .create_order(
                &mut tx,
                OrderHeader {
                    uuid: order.uuid,
                    number: &number,
                    user,
                    coupon_code: cart.coupon().map(|coupon| coupon.code()),
                    notes: order.notes.as_deref(),
                    pricing,
                },
            )
            .await?;

        self.repository
            .create_order_items(&mut tx, placed.uuid, &lines)
            .await?;

        cart.clear();

        self.carts.save(&mut tx, cart_record.uuid, &cart).await?;

        tx.commit().await?;

        info!(order_uuid = %placed.uuid, order_number = %placed.number, "placed order");

        placed.items = lines;

        Ok(placed)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// The user's orders with their lines, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Turns the user's cart into a pending order and empties the cart.
    async fn place_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
