//! Related Products Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use storefront_app::domain::{pagination::MAX_LIMIT, products::data::DEFAULT_RELATED_LIMIT};

use crate::{
    envelope::Envelope,
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Related Products Handler
///
/// Products sharing a category, tag or brand with the given product, best rated first.
#[endpoint(
    tags("products"),
    summary = "Related Products",
    responses(
        (status_code = StatusCode::OK, description = "Related products"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ProductResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let limit = limit.into_inner().unwrap_or(DEFAULT_RELATED_LIMIT);

    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(StatusError::bad_request().brief("Limit must be between 1 and 100"));
    }

    let products = state
        .app
        .products
        .related_products(product.into_inner().into(), limit)
        .await
        .map_err(into_status_error)?;

    Ok(Json(Envelope::data(
        products.into_iter().map(Into::into).collect(),
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(
            products,
            Router::with_path("products/{product}/related").get(handler),
        )
    }

    #[tokio::test]
    async fn test_related_uses_default_limit() -> TestResult {
        let uuid = ProductUuid::new();
        let other = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_related_products()
            .once()
            .withf(move |product, limit| *product == uuid && *limit == DEFAULT_RELATED_LIMIT)
            .return_once(move |_, _| Ok(vec![make_product(other)]));

        let body: Envelope<Vec<ProductResponse>> =
            TestClient::get(format!("http://example.com/products/{uuid}/related"))
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        let related: Vec<Uuid> = body
            .data
            .unwrap_or_default()
            .iter()
            .map(|product| product.uuid)
            .collect();

        assert_eq!(related, vec![other.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_related_unknown_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_related_products()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/products/{}/related?limit=2",
            Uuid::now_v7()
        ))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
