//! Products Data

use jiff::Timestamp;
use rust_decimal::Decimal;
use storefront::products::ProductStatus;

use crate::domain::{
    categories::records::CategoryUuid, pagination::PageRequest, products::records::ProductUuid,
};

/// Default number of featured products returned.
pub const DEFAULT_FEATURED_LIMIT: u32 = 8;

/// Default number of related products returned.
pub const DEFAULT_RELATED_LIMIT: u32 = 4;

/// Default number of sale products returned.
pub const DEFAULT_SALE_LIMIT: u32 = 12;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub compare_price: Option<u64>,
    pub category: Option<CategoryUuid>,
    pub brand: Option<String>,
    pub tags: Vec<String>,
    pub status: ProductStatus,
    pub stock: u64,
    pub track_quantity: bool,
    pub featured: bool,
    pub on_sale: bool,
    pub sale_ends_at: Option<Timestamp>,
}

/// Product Update Data
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub compare_price: Option<u64>,
    pub category: Option<CategoryUuid>,
    pub brand: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ProductStatus>,
    pub stock: Option<u64>,
    pub featured: Option<bool>,
    pub track_quantity: Option<bool>,
    pub on_sale: Option<bool>,
    pub sale_ends_at: Option<Timestamp>,
}

/// Product sort field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    Name,
    Price,
    Rating,
    #[default]
    CreatedAt,
}

impl ProductSort {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ProductSort::Name => "name",
            ProductSort::Price => "price",
            ProductSort::Rating => "rating",
            ProductSort::CreatedAt => "created_at",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Catalogue listing query. Only active products are ever listed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub page: PageRequest,

    /// Case-insensitive substring over name and description.
    pub search: Option<String>,
    pub category: Option<CategoryUuid>,

    /// Case-insensitive substring over brand.
    pub brand: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_rating: Option<Decimal>,

    /// Only products with stock remaining.
    pub in_stock: bool,

    /// Only featured products.
    pub featured: bool,

    /// Only products flagged on sale.
    pub on_sale: bool,

    /// Products carrying any of these tags.
    pub tags: Vec<String>,
    pub sort_by: ProductSort,
    pub sort_order: SortOrder,
}
