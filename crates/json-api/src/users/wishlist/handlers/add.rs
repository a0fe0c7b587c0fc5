//! Add To Wishlist Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::Envelope, extensions::*, products::models::ProductResponse, state::State,
    users::into_status_error,
};

/// Add To Wishlist Handler
///
/// Adding a product that is already wishlisted leaves the list unchanged.
#[endpoint(
    tags("users"),
    summary = "Add To Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated wishlist"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "users.wishlist.add", skip(product, depot), err)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ProductResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let wishlist = state
        .app
        .users
        .add_to_wishlist(user, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        Envelope::data(wishlist.into_iter().map(Into::into).collect())
            .message("Product added to wishlist"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        products::records::ProductUuid,
        users::{MockUsersService, UsersServiceError},
    };

    use crate::{
        envelope::ErrorEnvelope,
        test_helpers::{Mocks, TEST_USER_UUID, make_product},
    };

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        Mocks {
            users,
            ..Mocks::default()
        }
        .service(Router::with_path("users/wishlist/{product}").post(handler))
    }

    #[tokio::test]
    async fn test_add_to_wishlist_returns_wishlist() -> TestResult {
        let product = ProductUuid::new();

        let mut users = MockUsersService::new();

        users
            .expect_add_to_wishlist()
            .once()
            .withf(move |user, added| *user == TEST_USER_UUID && *added == product)
            .return_once(|_, added| Ok(vec![make_product(added)]));

        let mut res = TestClient::post(format!("http://example.com/users/wishlist/{product}"))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Envelope<Vec<ProductResponse>> = res.take_json().await?;

        assert_eq!(body.message.as_deref(), Some("Product added to wishlist"));
        assert_eq!(
            body.data.map(|products| products.len()),
            Some(1),
            "wishlist holds the added product"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_add_unknown_product_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_add_to_wishlist()
            .once()
            .return_once(|_, _| Err(UsersServiceError::ProductNotFound));

        let mut res =
            TestClient::post(format!("http://example.com/users/wishlist/{}", Uuid::now_v7()))
                .send(&make_service(users))
                .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(body.message, "Product not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_invalid_uuid_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_add_to_wishlist().never();

        let res = TestClient::post("http://example.com/users/wishlist/not-a-uuid")
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
