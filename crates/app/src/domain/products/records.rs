//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use storefront::products::{ProductStatus, discount_percentage, in_stock, is_low_stock};

use crate::{domain::categories::records::CategoryUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
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

    /// Whether stock is counted. Untracked products never run out.
    pub track_quantity: bool,
    pub featured: bool,
    pub on_sale: bool,

    /// When the sale stops. Open-ended when `None`.
    pub sale_ends_at: Option<Timestamp>,
    pub rating_average: Decimal,
    pub rating_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Whole percent saved against the compare-at price.
    #[must_use]
    pub fn discount_percentage(&self) -> u64 {
        discount_percentage(self.price, self.compare_price)
    }

    #[must_use]
    pub fn in_stock(&self) -> bool {
        in_stock(self.stock, self.track_quantity)
    }

    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        is_low_stock(self.stock, self.track_quantity)
    }
}
