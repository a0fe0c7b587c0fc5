//! Product Index Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use storefront_app::domain::{
    pagination::{DEFAULT_LIMIT, MAX_LIMIT, PageRequest},
    products::data::{ProductQuery, ProductSort, SortOrder},
};

use crate::{
    envelope::{Envelope, PaginationResponse, validation_failed},
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Raw listing parameters, validated by hand so every failure can be reported at once.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListProductsParams {
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
    category: Option<String>,
    brand: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    rating: Option<String>,
    in_stock: Option<String>,
    featured: Option<String>,
    on_sale: Option<String>,

    /// Comma separated
    tags: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
}

impl ListProductsParams {
    fn into_query(self) -> Result<ProductQuery, Vec<String>> {
        let mut errors = Vec::new();

        let page = match self.page.as_deref().map(str::parse::<u32>) {
            None => 1,
            Some(Ok(page)) if page >= 1 => page,
            Some(_) => {
                errors.push("Page must be a positive integer".to_string());
                1
            }
        };

        let limit = match self.limit.as_deref().map(str::parse::<u32>) {
            None => DEFAULT_LIMIT,
            Some(Ok(limit)) if (1..=MAX_LIMIT).contains(&limit) => limit,
            Some(_) => {
                errors.push("Limit must be between 1 and 100".to_string());
                DEFAULT_LIMIT
            }
        };

        let sort_by = match self.sort_by.as_deref() {
            None | Some("createdAt") => ProductSort::CreatedAt,
            Some("name") => ProductSort::Name,
            Some("price") => ProductSort::Price,
            Some("rating") => ProductSort::Rating,
            Some(_) => {
                errors.push("Invalid sort field".to_string());
                ProductSort::default()
            }
        };

        let sort_order = match self.sort_order.as_deref() {
            None | Some("desc") => SortOrder::Desc,
            Some("asc") => SortOrder::Asc,
            Some(_) => {
                errors.push("Sort order must be asc or desc".to_string());
                SortOrder::default()
            }
        };

        let min_price = parse_price(self.min_price.as_deref())
            .map_err(|()| errors.push("Min price must be non-negative".to_string()))
            .unwrap_or_default();

        let max_price = parse_price(self.max_price.as_deref())
            .map_err(|()| errors.push("Max price must be non-negative".to_string()))
            .unwrap_or_default();

        let min_rating = match self.rating.as_deref().map(str::parse::<Decimal>) {
            None => None,
            Some(Ok(rating)) if rating >= Decimal::ZERO && rating <= Decimal::from(5) => {
                Some(rating)
            }
            Some(_) => {
                errors.push("Rating must be between 0 and 5".to_string());
                None
            }
        };

        let category = match non_empty(self.category).as_deref().map(Uuid::parse_str) {
            None => None,
            Some(Ok(category)) => Some(category.into()),
            Some(Err(_)) => {
                errors.push("Category must be a valid UUID".to_string());
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let page = PageRequest::new(page, limit).unwrap_or_default();

        Ok(ProductQuery {
            page,
            search: non_empty(self.search),
            category,
            brand: non_empty(self.brand),
            min_price,
            max_price,
            min_rating,
            in_stock: self.in_stock.as_deref() == Some("true"),
            featured: self.featured.as_deref() == Some("true"),
            on_sale: self.on_sale.as_deref() == Some("true"),
            tags: self
                .tags
                .as_deref()
                .map(|tags| {
                    tags.split(',')
                        .map(str::trim)
                        .filter(|tag| !tag.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            sort_by,
            sort_order,
        })
    }
}

/// Prices are whole minor units.
fn parse_price(value: Option<&str>) -> Result<Option<u64>, ()> {
    value
        .map(|value| value.trim().parse::<u64>().map_err(|_ignored| ()))
        .transpose()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Product Index Handler
///
/// Lists active products, filtered, sorted and paginated. Query parameters: `page`, `limit`,
/// `search`, `category`, `brand`, `minPrice`, `maxPrice`, `rating`, `inStock`, `featured`,
/// `onSale`, `tags` (comma separated), `sortBy` (`name`, `price`, `rating`, `createdAt`) and
/// `sortOrder` (`asc`, `desc`).
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "A page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Validation failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ProductResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = req
        .parse_queries::<ListProductsParams>()
        .or_400("Invalid query string")?
        .into_query()
        .map_err(validation_failed)?;

    let page = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    let pagination = PaginationResponse::from(&page);

    Ok(Json(
        Envelope::data(page.items.into_iter().map(Into::into).collect()).pagination(pagination),
    ))
}
