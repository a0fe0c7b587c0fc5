//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use storefront::products::ProductStatus;
use uuid::Uuid;

use storefront_app::domain::products::{data::NewProduct, records::ProductUuid};

use crate::{
    envelope::{Envelope, validation_failed},
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

const MAX_NAME_LENGTH: usize = 200;
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub description: String,

    /// Price in minor units
    pub price: u64,

    /// Compare-at price in minor units
    #[serde(default)]
    pub compare_price: Option<u64>,

    #[serde(default)]
    pub category: Option<Uuid>,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// `active`, `inactive` or `archived`; defaults to `active`
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub stock: u64,

    /// Whether stock is counted; defaults to `true`
    #[serde(default = "tracks_quantity_by_default")]
    pub track_quantity: bool,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub on_sale: bool,

    /// RFC 3339 timestamp the sale ends at
    #[serde(default)]
    pub sale_ends_at: Option<String>,
}

fn tracks_quantity_by_default() -> bool {
    true
}

impl CreateProductRequest {
    fn into_new_product(self) -> Result<NewProduct, Vec<String>> {
        let mut errors = Vec::new();

        let name = self.name.trim().to_string();

        if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
            errors.push(
                "Product name is required and must be less than 200 characters".to_string(),
            );
        }

        let description = self.description.trim().to_string();

        if description.is_empty() || description.chars().count() > MAX_DESCRIPTION_LENGTH {
            errors.push(
                "Description is required and must be less than 2000 characters".to_string(),
            );
        }

        let status = match self.status.as_deref().map(str::parse::<ProductStatus>) {
            None => ProductStatus::Active,
            Some(Ok(status)) => status,
            Some(Err(_)) => {
                errors.push("Status must be active, inactive or archived".to_string());
                ProductStatus::Active
            }
        };

        let sale_ends_at = match self.sale_ends_at.as_deref().map(str::parse::<Timestamp>) {
            None => None,
            Some(Ok(ends_at)) => Some(ends_at),
            Some(Err(_)) => {
                errors.push("Sale end must be a valid date".to_string());
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewProduct {
            uuid: ProductUuid::new(),
            name,
            description,
            price: self.price,
            compare_price: self.compare_price,
            category: self.category.map(Into::into),
            brand: self.brand,
            tags: self.tags,
            status,
            stock: self.stock,
            track_quantity: self.track_quantity,
            featured: self.featured,
            on_sale: self.on_sale,
            sale_ends_at,
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_uuid_or_401()?;

    let new_product = json.into_inner().into_new_product().map_err(validation_failed)?;

    tracing::Span::current().record("product_uuid", tracing::field::display(new_product.uuid));

    let product = state
        .app
        .products
        .create_product(new_product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_uuid = %product.uuid, "created product");

    Ok(Json(
        Envelope::data(product.into()).message("Product created successfully"),
    ))
}
