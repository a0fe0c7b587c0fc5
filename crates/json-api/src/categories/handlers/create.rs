//! Create Category Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::categories::{data::NewCategory, records::CategoryUuid};

use crate::{
    categories::{errors::into_status_error, models::CategoryResponse},
    envelope::{Envelope, validation_failed},
    extensions::*,
    state::State,
};

/// Create Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCategoryRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Parent category, absent for a root category
    #[serde(default)]
    pub parent: Option<Uuid>,

    #[serde(default)]
    pub sort_order: i32,
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(request: CreateCategoryRequest) -> Self {
        NewCategory {
            uuid: CategoryUuid::new(),
            name: request.name.trim().to_string(),
            description: request.description,
            parent: request.parent.map(Into::into),
            sort_order: request.sort_order,
        }
    }
}

/// Create Category Handler
///
/// The slug is derived from the name; level and path from the parent.
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Category already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_uuid_or_401()?;

    let new_category = NewCategory::from(json.into_inner());

    if new_category.name.is_empty() {
        return Err(validation_failed(vec![
            "Category name is required".to_string(),
        ]));
    }

    let category = state
        .app
        .categories
        .create_category(new_category)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/categories/{}", category.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(category_uuid = %category.uuid, slug = %category.slug, "created category");

    Ok(Json(
        Envelope::data(category.into()).message("Category created successfully"),
    ))
}
