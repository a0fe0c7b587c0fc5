//! App Router
//!
//! Catalogue reads and rides are public; everything that touches a user's
//! cart, orders, profile, wishlist or the catalogue's contents needs a bearer token.

use salvo::Router;

use crate::{auth, carts, categories, orders, products, reviews, rides, users};

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("featured").get(products::featured::handler))
                .push(Router::with_path("sale/list").get(products::sale::handler))
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .push(Router::with_path("related").get(products::related::handler)),
                ),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(Router::with_path("tree").get(categories::tree::handler)),
        )
        .push(
            Router::with_path("rides")
                .get(rides::index::handler)
                .post(rides::create::handler),
        )
}

fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(Router::with_path("categories").post(categories::create::handler))
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{item}")
                                .put(carts::items::update::handler)
                                .delete(carts::items::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("coupon")
                        .post(carts::coupon::apply::handler)
                        .delete(carts::coupon::remove::handler),
                )
                .push(Router::with_path("validate").get(carts::validate::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler),
        )
        .push(
            Router::with_path("users")
                .push(
                    Router::with_path("profile")
                        .get(users::profile::handler)
                        .put(users::update::handler),
                )
                .push(
                    Router::with_path("wishlist")
                        .get(users::wishlist::index::handler)
                        .push(
                            Router::with_path("{product}")
                                .post(users::wishlist::add::handler)
                                .delete(users::wishlist::remove::handler),
                        ),
                ),
        )
        .push(Router::with_path("reviews/{product}").post(reviews::create::handler))
}

pub fn app_router() -> Router {
    Router::new()
        .push(public_router())
        .push(authenticated_router())
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        catcher::Catcher,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::{products::MockProductsService, rides::MockRidesService},
    };

    use crate::{
        catcher::EnvelopeCatcher,
        envelope::{Envelope, ErrorEnvelope},
        products::models::ProductResponse,
        test_helpers::Mocks,
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(Router::with_path("api").push(app_router())),
        )
        .catcher(Catcher::default().hoop(EnvelopeCatcher::new(false)))
    }

    #[tokio::test]
    async fn test_public_routes_skip_auth() -> TestResult {
        let mut rides = MockRidesService::new();

        rides
            .expect_list_rides()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/api/rides")
            .send(&make_service(Mocks {
                rides,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_featured_is_not_taken_for_a_product_uuid() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_featured_products()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let body: Envelope<Vec<ProductResponse>> =
            TestClient::get("http://example.com/api/products/featured")
                .send(&make_service(Mocks {
                    products,
                    ..Mocks::default()
                }))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.map(|products| products.len()), Some(0));

        Ok(())
    }

    #[tokio::test]
    async fn test_sale_list_is_not_taken_for_a_product_uuid() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_sale_products()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/api/products/sale/list")
            .send(&make_service(Mocks {
                products,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_wishlist_requires_token() -> TestResult {
        let res = TestClient::post(format!(
            "http://example.com/api/users/wishlist/{}",
            uuid::Uuid::now_v7()
        ))
        .send(&make_service(Mocks::default()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_requires_token() -> TestResult {
        let mut res = TestClient::get("http://example.com/api/cart")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(body.message, "Not authorized, no token");

        Ok(())
    }

    #[tokio::test]
    async fn test_product_writes_reject_unknown_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::post("http://example.com/api/products")
            .add_header("authorization", "Bearer stale", true)
            .json(&serde_json::json!({ "name": "Tote" }))
            .send(&make_service(Mocks {
                auth,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
