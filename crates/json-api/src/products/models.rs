//! Product Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront::ratings::RatingSummary;
use uuid::Uuid;

use storefront_app::domain::products::records::ProductRecord;

/// Aggregate rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatingResponse {
    /// Mean rating to one decimal place, as a decimal string
    pub average: String,

    /// Number of reviews
    pub count: u64,
}

impl From<RatingSummary> for RatingResponse {
    fn from(summary: RatingSummary) -> Self {
        Self {
            average: summary.average.to_string(),
            count: summary.count,
        }
    }
}

/// Product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub description: String,

    /// Price in minor units
    pub price: u64,

    /// Compare-at price in minor units
    pub compare_price: Option<u64>,
    pub category: Option<Uuid>,
    pub brand: Option<String>,
    pub tags: Vec<String>,
    pub status: String,
    pub stock: u64,
    pub track_quantity: bool,
    pub featured: bool,
    pub on_sale: bool,
    pub sale_ends_at: Option<String>,
    pub rating: RatingResponse,

    /// Whole percent saved against the compare-at price
    pub discount_percentage: u64,
    pub in_stock: bool,
    pub is_low_stock: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            discount_percentage: product.discount_percentage(),
            in_stock: product.in_stock(),
            is_low_stock: product.is_low_stock(),
            uuid: product.uuid.into_uuid(),
            name: product.name,
            description: product.description,
            price: product.price,
            compare_price: product.compare_price,
            category: product.category.map(|category| category.into_uuid()),
            brand: product.brand,
            tags: product.tags,
            status: product.status.as_str().to_string(),
            stock: product.stock,
            track_quantity: product.track_quantity,
            featured: product.featured,
            on_sale: product.on_sale,
            sale_ends_at: product.sale_ends_at.map(|ends_at| ends_at.to_string()),
            rating: RatingResponse {
                average: product.rating_average.to_string(),
                count: product.rating_count,
            },
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
