//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use storefront::products::ProductStatus;
use uuid::Uuid;

use storefront_app::domain::products::data::ProductUpdate;

use crate::{
    envelope::{Envelope, validation_failed},
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub compare_price: Option<u64>,
    pub category: Option<Uuid>,
    pub brand: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub stock: Option<u64>,
    pub featured: Option<bool>,
    pub track_quantity: Option<bool>,
    pub on_sale: Option<bool>,

    /// RFC 3339 timestamp the sale ends at
    pub sale_ends_at: Option<String>,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = Vec<String>;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .as_deref()
            .map(str::parse::<ProductStatus>)
            .transpose()
            .map_err(|_ignored| vec!["Status must be active, inactive or archived".to_string()])?;

        let sale_ends_at = request
            .sale_ends_at
            .as_deref()
            .map(str::parse::<Timestamp>)
            .transpose()
            .map_err(|_ignored| vec!["Sale end must be a valid date".to_string()])?;

        Ok(ProductUpdate {
            name: request.name.map(|name| name.trim().to_string()),
            description: request
                .description
                .map(|description| description.trim().to_string()),
            price: request.price,
            compare_price: request.compare_price,
            category: request.category.map(Into::into),
            brand: request.brand,
            tags: request.tags,
            status,
            stock: request.stock,
            featured: request.featured,
            track_quantity: request.track_quantity,
            on_sale: request.on_sale,
            sale_ends_at,
        })
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_uuid_or_401()?;

    let product = product.into_inner();
    let update = ProductUpdate::try_from(json.into_inner()).map_err(validation_failed)?;

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let updated = state
        .app
        .products
        .update_product(product.into(), update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %product, "updated product");

    Ok(Json(
        Envelope::data(updated.into()).message("Product updated successfully"),
    ))
}
