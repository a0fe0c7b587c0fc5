//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        products::{
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        users::{
            data::{NewUser, ProfileUpdate},
            errors::UsersServiceError,
            records::{UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    products_repository: PgProductsRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_profile(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let profile = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(profile)
    }

    #[tracing::instrument(
        name = "users.service.update_profile",
        skip(self, update),
        fields(user_uuid = %user),
        err
    )]
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_user(&mut tx, user, update).await?;

        tx.commit().await?;

        info!(user_uuid = %user, "updated profile");

        Ok(updated)
    }

    async fn get_wishlist(&self, user: UserUuid) -> Result<Vec<ProductRecord>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let wishlist = self.repository.get_wishlist(&mut tx, user).await?;

        tx.commit().await?;

        Ok(wishlist)
    }

    #[tracing::instrument(
        name = "users.service.add_to_wishlist",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product),
        err
    )]
    async fn add_to_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Vec<ProductRecord>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.products_repository
            .get_product(&mut tx, product)
            .await
            .map_err(|error| match UsersServiceError::from(error) {
                UsersServiceError::NotFound => UsersServiceError::ProductNotFound,
                other => other,
            })?;

        self.repository
            .add_wishlist_item(&mut tx, user, product)
            .await?;

        let wishlist = self.repository.get_wishlist(&mut tx, user).await?;

        tx.commit().await?;

        Ok(wishlist)
    }

    #[tracing::instrument(
        name = "users.service.remove_from_wishlist",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product),
        err
    )]
    async fn remove_from_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Vec<ProductRecord>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository
            .remove_wishlist_item(&mut tx, user, product)
            .await?;

        let wishlist = self.repository.get_wishlist(&mut tx, user).await?;

        tx.commit().await?;

        Ok(wishlist)
    }
}

#[automock]
#[async_trait]
/// User persistence operations.
pub trait UsersService: Send + Sync {
    /// Creates a new user with a pre-hashed API token.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieves the profile of a user.
    async fn get_profile(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Applies a partial profile update. Fields left unset keep their current value.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Products on the user's wishlist, in the order they were added.
    async fn get_wishlist(&self, user: UserUuid) -> Result<Vec<ProductRecord>, UsersServiceError>;

    /// Adds an existing product to the wishlist and returns the whole list. Adding a
    /// product already on the list changes nothing.
    async fn add_to_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Vec<ProductRecord>, UsersServiceError>;

    /// Removes a product from the wishlist, if present, and returns the whole list.
    async fn remove_from_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Vec<ProductRecord>, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        auth::hash_api_token,
        domain::products::ProductsService,
        test::{TestContext, helpers::create_product},
    };

    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            uuid: UserUuid::new(),
            name: "Ada".to_string(),
            email: email.to_string(),
            token_hash: hash_api_token(&format!("sf_{email}")),
        }
    }

    #[tokio::test]
    async fn create_user_returns_profile() -> TestResult {
        let ctx = TestContext::new().await;
        let before = Timestamp::now();

        let user = new_user("Ada@Example.com");
        let uuid = user.uuid;

        let created = ctx.users.create_user(user).await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(created.name, "Ada");
        assert_eq!(created.email, "ada@example.com", "email is stored lowercased");
        assert!(created.created_at >= before);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users.create_user(new_user("dup@example.com")).await?;

        let mut second = new_user("dup@example.com");
        second.token_hash = hash_api_token("another");

        let result = ctx.users.create_user(second).await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_user_blank_name_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let mut user = new_user("blank@example.com");
        user.name = "   ".to_string();

        let result = ctx.users.create_user(user).await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_profile_returns_test_user() -> TestResult {
        let ctx = TestContext::new().await;

        let profile = ctx.users.get_profile(ctx.user_uuid).await?;

        assert_eq!(profile.uuid, ctx.user_uuid);

        Ok(())
    }

    #[tokio::test]
    async fn get_profile_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_profile(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_profile_patches_only_given_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let before = ctx.users.get_profile(ctx.user_uuid).await?;

        let renamed = ctx
            .users
            .update_profile(
                ctx.user_uuid,
                ProfileUpdate {
                    name: Some("Grace Hopper".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await?;

        assert_eq!(renamed.name, "Grace Hopper");
        assert_eq!(renamed.email, before.email);
        assert_eq!(renamed.phone, None);
        assert!(renamed.updated_at >= before.updated_at);

        let with_phone = ctx
            .users
            .update_profile(
                ctx.user_uuid,
                ProfileUpdate {
                    phone: Some("+44 20 7946 0000".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await?;

        assert_eq!(with_phone.name, "Grace Hopper");
        assert_eq!(with_phone.phone.as_deref(), Some("+44 20 7946 0000"));

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_blank_name_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .update_profile(
                ctx.user_uuid,
                ProfileUpdate {
                    name: Some(" ".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_profile_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .update_profile(UserUuid::new(), ProfileUpdate::default())
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn wishlist_add_is_idempotent_and_remove_drops_product() -> TestResult {
        let ctx = TestContext::new().await;
        let kettle = create_product(&ctx, "Kettle", 40_00).await?;
        let teapot = create_product(&ctx, "Teapot", 25_00).await?;

        ctx.users.add_to_wishlist(ctx.user_uuid, kettle.uuid).await?;
        ctx.users.add_to_wishlist(ctx.user_uuid, teapot.uuid).await?;

        let again = ctx.users.add_to_wishlist(ctx.user_uuid, kettle.uuid).await?;
        let uuids: Vec<_> = again.iter().map(|product| product.uuid).collect();

        assert_eq!(uuids, vec![kettle.uuid, teapot.uuid]);

        let removed = ctx
            .users
            .remove_from_wishlist(ctx.user_uuid, kettle.uuid)
            .await?;
        let uuids: Vec<_> = removed.iter().map(|product| product.uuid).collect();

        assert_eq!(uuids, vec![teapot.uuid]);

        let absent = ctx
            .users
            .remove_from_wishlist(ctx.user_uuid, kettle.uuid)
            .await?;

        assert_eq!(absent.len(), 1, "removing twice changes nothing");

        let other = ctx.create_user("other@example.com").await?;

        assert!(ctx.users.get_wishlist(other).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn wishlist_unknown_or_deleted_product_returns_product_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let unknown = ctx
            .users
            .add_to_wishlist(ctx.user_uuid, ProductUuid::new())
            .await;

        assert!(
            matches!(unknown, Err(UsersServiceError::ProductNotFound)),
            "expected ProductNotFound, got {unknown:?}"
        );

        let lamp = create_product(&ctx, "Lamp", 30_00).await?;

        ctx.users.add_to_wishlist(ctx.user_uuid, lamp.uuid).await?;
        ctx.products.delete_product(lamp.uuid).await?;

        assert!(
            ctx.users.get_wishlist(ctx.user_uuid).await?.is_empty(),
            "deleted products drop off the wishlist"
        );

        let deleted = ctx.users.add_to_wishlist(ctx.user_uuid, lamp.uuid).await;

        assert!(
            matches!(deleted, Err(UsersServiceError::ProductNotFound)),
            "expected ProductNotFound, got {deleted:?}"
        );

        Ok(())
    }
}
