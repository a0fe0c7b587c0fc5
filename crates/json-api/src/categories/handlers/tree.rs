//! Category Tree Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    categories::{errors::into_status_error, models::CategoryTreeResponse},
    envelope::Envelope,
    extensions::*,
    state::State,
};

/// Category Tree Handler
///
/// Root categories with their descendants nested beneath them.
#[endpoint(
    tags("categories"),
    summary = "Category Tree",
    responses(
        (status_code = StatusCode::OK, description = "Category tree"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<CategoryTreeResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tree = state
        .app
        .categories
        .category_tree()
        .await
        .map_err(into_status_error)?;

    Ok(Json(Envelope::data(tree.into_iter().map(Into::into).collect())))
}
