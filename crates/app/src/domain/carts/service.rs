//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use storefront::{
    cart::{AddOutcome, Cart},
    coupons::Coupon,
    items::LineItem,
    pricing::PricingPolicy,
    products::covers_quantity,
};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{
                CartItemRecord, CartItemUuid, CartRecord, CartUuid, InvalidCartItem,
                InvalidItemReason,
            },
            repositories::{ItemAvailability, PgCartItemsRepository, PgCartsRepository},
        },
        products::repository::PgProductsRepository,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
    policy: PricingPolicy,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            policy: PricingPolicy::default(),
        }
    }

    pub(crate) fn policy(&self) -> PricingPolicy {
        self.policy
    }

    /// Loads the user's cart, creating it if needed, and locks it for the transaction.
    pub(crate) async fn load_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(CartRecord, Cart), CartsServiceError> {
        self.carts_repository.ensure_cart(tx, user).await?;

        let mut record = self.carts_repository.lock_cart(tx, user).await?;

        record.items = self.items_repository.get_cart_items(tx, record.uuid).await?;

        let cart = Cart::new(
            record.items.iter().map(line_item).collect(),
            record.coupon.clone(),
        );

        Ok((record, cart))
    }

    /// Recomputes the totals of `cart` and writes its lines, coupon and totals.
    pub(crate) async fn save(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CartUuid,
        cart: &Cart,
    ) -> Result<CartRecord, CartsServiceError> {
        let totals = cart.totals(&self.policy)?;

        self.items_repository
            .sync_cart_items(tx, uuid, cart.items())
            .await?;

        let mut record = self
            .carts_repository
            .update_cart(tx, uuid, cart.coupon(), &totals)
            .await?;

        record.items = self.items_repository.get_cart_items(tx, uuid).await?;

        Ok(record)
    }
}

fn line_item(item: &CartItemRecord) -> LineItem {
    LineItem::new(
        item.uuid.into_uuid(),
        item.product.into_uuid(),
        item.variant.clone(),
        item.quantity,
        item.unit_price,
    )
}

fn invalid_item(availability: ItemAvailability) -> Option<InvalidCartItem> {
    if availability.deleted || !availability.status.is_active() {
        return Some(InvalidCartItem {
            item: availability.item,
            reason: InvalidItemReason::Unavailable,
            available_stock: None,
        });
    }

    let covered = covers_quantity(
        availability.stock,
        availability.track_quantity,
        u64::from(availability.quantity),
    );

    (!covered).then_some(InvalidCartItem {
        item: availability.item,
        reason: InvalidItemReason::InsufficientStock,
        available_stock: Some(availability.stock),
    })
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.carts_repository.ensure_cart(&mut tx, user).await?;

        let mut cart = self.carts_repository.get_cart(&mut tx, user).await?;

        cart.items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            user_uuid = %user,
            product_uuid = %item.product,
            quantity = item.quantity,
            merged = tracing::field::Empty
        ),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let (record, mut cart) = self.load_for_update(&mut tx, user).await?;

        let product = self
            .products_repository
            .get_product(&mut tx, item.product)
            .await
            .map_err(|error| match CartsServiceError::from(error) {
                CartsServiceError::NotFound => CartsServiceError::ProductUnavailable,
                other => other,
            })?;

        if !product.status.is_active() {
            return Err(CartsServiceError::ProductUnavailable);
        }

        let outcome = cart.add_item(
            item.uuid.into_uuid(),
            product.uuid.into_uuid(),
            item.variant,
            item.quantity,
            product.price,
        )?;

        Span::current().record(
            "merged",
            tracing::field::display(matches!(outcome, AddOutcome::Merged(_))),
        );

        let saved = self.save(&mut tx, record.uuid, &cart).await?;

        tx.commit().await?;

        info!(cart_uuid = %saved.uuid, line = %outcome.line(), "added cart item");

        Ok(saved)
    }

    #[tracing::instrument(
        name = "carts.service.update_item",
        skip(self),
        fields(user_uuid = %user, item_uuid = %item),
        err
    )]
    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let (record, mut cart) = self.load_for_update(&mut tx, user).await?;

        cart.update_item(item.into_uuid(), quantity)?;

        let saved = self.save(&mut tx, record.uuid, &cart).await?;

        tx.commit().await?;

        Ok(saved)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(user_uuid = %user, item_uuid = %item),
        err
    )]
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let (record, mut cart) = self.load_for_update(&mut tx, user).await?;

        cart.remove_item(item.into_uuid())?;

        let saved = self.save(&mut tx, record.uuid, &cart).await?;

        tx.commit().await?;

        Ok(saved)
    }

    #[tracing::instrument(
        name = "carts.service.clear_cart",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn clear_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let (record, mut cart) = self.load_for_update(&mut tx, user).await?;

        cart.clear();

        let saved = self.save(&mut tx, record.uuid, &cart).await?;

        tx.commit().await?;

        Ok(saved)
    }

    #[tracing::instrument(
        name = "carts.service.apply_coupon",
        skip(self, coupon),
        fields(user_uuid = %user, coupon_code = %coupon.code()),
        err
    )]
    async fn apply_coupon(
        &self,
        user: UserUuid,
        coupon: Coupon,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let (record, mut cart) = self.load_for_update(&mut tx, user).await?;

        cart.apply_coupon(coupon);

        let saved = self.save(&mut tx, record.uuid, &cart).await?;

        tx.commit().await?;

        Ok(saved)
    }

    #[tracing::instrument(
        name = "carts.service.remove_coupon",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn remove_coupon(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let (record, mut cart) = self.load_for_update(&mut tx, user).await?;

        cart.remove_coupon();

        let saved = self.save(&mut tx, record.uuid, &cart).await?;

        tx.commit().await?;

        Ok(saved)
    }

    async fn validate_items(
        &self,
        user: UserUuid,
    ) -> Result<Vec<InvalidCartItem>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.carts_repository.ensure_cart(&mut tx, user).await?;

        let cart = self.carts_repository.get_cart(&mut tx, user).await?;

        let availability = self
            .items_repository
            .item_availability(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(availability.into_iter().filter_map(invalid_item).collect())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart, created empty on first access.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Adds an active product to the cart at its current price, merging with a line for the
    /// same product and variant.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Sets a line's quantity; zero or below removes the line.
    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<CartRecord, CartsServiceError>;

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Removes every line and the coupon.
    async fn clear_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Applies a coupon, replacing any coupon already applied.
    async fn apply_coupon(
        &self,
        user: UserUuid,
        coupon: Coupon,
    ) -> Result<CartRecord, CartsServiceError>;

    async fn remove_coupon(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Lines whose product is no longer sold or lacks the stock to cover them.
    async fn validate_items(
        &self,
        user: UserUuid,
    ) -> Result<Vec<InvalidCartItem>, CartsServiceError>;
}
