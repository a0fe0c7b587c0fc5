//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use storefront::products::ProductStatus;
use uuid::Uuid;

use crate::domain::{
    amounts::{decode_amount, encode_amount, try_get_amount, try_get_optional_amount},
    categories::records::CategoryUuid,
    products::{
        data::{NewProduct, ProductQuery, ProductUpdate},
        records::{ProductRecord, ProductUuid},
    },
    search::contains_pattern,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const FEATURED_PRODUCTS_SQL: &str = include_str!("sql/featured_products.sql");
const RELATED_PRODUCTS_SQL: &str = include_str!("sql/related_products.sql");
const UPDATE_RATING_SQL: &str = include_str!("sql/update_rating.sql");
const SALE_PRODUCTS_SQL: &str = include_str!("sql/sale_products.sql");

/// Filter parameters shared by the listing and count queries, in bind order.
struct ListingFilter {
    search: Option<String>,
    category: Option<Uuid>,
    brand: Option<String>,
    min_price: Option<i64>,
    max_price: Option<i64>,
    min_rating: Option<Decimal>,
    in_stock: bool,
    featured: bool,
    tags: Vec<String>,
    on_sale: bool,
}

impl ListingFilter {
    fn from_query(query: &ProductQuery) -> Result<Self, sqlx::Error> {
        Ok(Self {
            search: query.search.as_deref().map(contains_pattern),
            category: query.category.map(CategoryUuid::into_uuid),
            brand: query.brand.as_deref().map(contains_pattern),
            min_price: query.min_price.map(encode_amount).transpose()?,
            max_price: query.max_price.map(encode_amount).transpose()?,
            min_rating: query.min_rating,
            in_stock: query.in_stock,
            featured: query.featured,
            tags: query.tags.clone(),
            on_sale: query.on_sale,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &ProductQuery,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let filter = ListingFilter::from_query(products)?;

        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.search)
            .bind(filter.category)
            .bind(filter.brand)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.min_rating)
            .bind(filter.in_stock)
            .bind(filter.featured)
            .bind(filter.tags)
            .bind(filter.on_sale)
            .bind(products.sort_by.as_str())
            .bind(products.sort_order.as_str())
            .bind(i64::from(products.page.limit()))
            .bind(encode_amount(products.page.offset())?)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &ProductQuery,
    ) -> Result<u64, sqlx::Error> {
        let filter = ListingFilter::from_query(products)?;

        let count = query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .bind(filter.search)
            .bind(filter.category)
            .bind(filter.brand)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.min_rating)
            .bind(filter.in_stock)
            .bind(filter.featured)
            .bind(filter.tags)
            .bind(filter.on_sale)
            .fetch_one(&mut **tx)
            .await?;

        decode_amount("count", count)
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Loads a product and holds its row lock until the transaction ends.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(product.description)
            .bind(encode_amount(product.price)?)
            .bind(product.compare_price.map(encode_amount).transpose()?)
            .bind(product.category.map(CategoryUuid::into_uuid))
            .bind(product.brand)
            .bind(product.tags)
            .bind(product.status.as_str())
            .bind(encode_amount(product.stock)?)
            .bind(product.track_quantity)
            .bind(product.featured)
            .bind(product.on_sale)
            .bind(product.sale_ends_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name)
            .bind(update.description)
            .bind(update.price.map(encode_amount).transpose()?)
            .bind(update.compare_price.map(encode_amount).transpose()?)
            .bind(update.category.map(CategoryUuid::into_uuid))
            .bind(update.brand)
            .bind(update.tags)
            .bind(update.status.map(ProductStatus::as_str))
            .bind(update.stock.map(encode_amount).transpose()?)
            .bind(update.featured)
            .bind(update.track_quantity)
            .bind(update.on_sale)
            .bind(update.sale_ends_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    /// Soft deletes a product, returning whether a live row was marked.
    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        let result = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub(crate) async fn featured_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(FEATURED_PRODUCTS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    /// Active products flagged on sale whose sale has not ended, newest first.
    pub(crate) async fn sale_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SALE_PRODUCTS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn related_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductRecord,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(RELATED_PRODUCTS_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.category.map(CategoryUuid::into_uuid))
            .bind(product.tags.as_slice())
            .bind(product.brand.as_deref())
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_rating(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        average: Decimal,
        count: u64,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_RATING_SQL)
            .bind(product.into_uuid())
            .bind(average)
            .bind(encode_amount(count)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<ProductStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: try_get_amount(row, "price")?,
            compare_price: try_get_optional_amount(row, "compare_price")?,
            category: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(CategoryUuid::from_uuid),
            brand: row.try_get("brand")?,
            tags: row.try_get("tags")?,
            status,
            stock: try_get_amount(row, "stock")?,
            track_quantity: row.try_get("track_quantity")?,
            featured: row.try_get("featured")?,
            on_sale: row.try_get("on_sale")?,
            sale_ends_at: row
                .try_get::<Option<SqlxTimestamp>, _>("sale_ends_at")?
                .map(SqlxTimestamp::to_jiff),
            rating_average: row.try_get("rating_average")?,
            rating_count: try_get_amount(row, "rating_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

