//! Test context for service-level integration tests.

use crate::{
    auth::{format_api_token, generate_api_token_secret, hash_api_token},
    database::Db,
    domain::{
        carts::PgCartsService,
        categories::PgCategoriesService,
        orders::PgOrdersService,
        products::PgProductsService,
        reviews::PgReviewsService,
        rides::PgRidesService,
        users::{
            PgUsersService, UsersService, UsersServiceError, data::NewUser, records::UserUuid,
        },
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,

    /// Default user every test acts as.
    pub user_uuid: UserUuid,

    /// Plaintext API token of the default user.
    pub user_token: String,
    pub users: PgUsersService,
    pub categories: PgCategoriesService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
    pub reviews: PgReviewsService,
    pub rides: PgRidesService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let users = PgUsersService::new(db.clone());

        let user_token = format_api_token(&generate_api_token_secret());

        let user = users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                token_hash: hash_api_token(&user_token),
            })
            .await
            .expect("Failed to create default test user");

        Self {
            user_uuid: user.uuid,
            user_token,
            users,
            categories: PgCategoriesService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            reviews: PgReviewsService::new(db.clone()),
            rides: PgRidesService::new(db),
            db: test_db,
        }
    }

    /// Create an additional user, useful for isolation tests.
    pub async fn create_user(&self, email: &str) -> Result<UserUuid, UsersServiceError> {
        let token = format_api_token(&generate_api_token_secret());

        let user = self
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                name: "Another User".to_string(),
                email: email.to_string(),
                token_hash: hash_api_token(&token),
            })
            .await?;

        Ok(user.uuid)
    }
}
