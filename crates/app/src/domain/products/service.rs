//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        pagination::Page,
        products::{
            data::{NewProduct, ProductQuery, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx, &query).await?;
        let total = self.repository.count_products(&mut tx, &query).await?;

        tx.commit().await?;

        Ok(Page::new(products, query.page, total))
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let found = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let deleted = self.repository.delete_product(&mut tx, product).await?;

        if !deleted {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn featured_products(
        &self,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.featured_products(&mut tx, limit).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn sale_products(&self, limit: u32) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.sale_products(&mut tx, limit).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn related_products(
        &self,
        product: ProductUuid,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        let related = self
            .repository
            .related_products(&mut tx, &product, limit)
            .await?;

        tx.commit().await?;

        Ok(related)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// One page of active products matching the query.
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Any product that has not been deleted, whatever its status.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies a partial update. Fields left unset keep their current value.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft deletes a product. Deleted products behave as if they never existed.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Newest featured active products.
    async fn featured_products(&self, limit: u32)
    -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Newest active products on sale, skipping sales that have already ended.
    async fn sale_products(&self, limit: u32) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Active products sharing a category, tag or brand with the given product, best rated
    /// first.
    async fn related_products(
        &self,
        product: ProductUuid,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};
    use rust_decimal::Decimal;
    use storefront::products::ProductStatus;
    use testresult::TestResult;

    use crate::{
        domain::{
            categories::records::CategoryUuid,
            pagination::PageRequest,
            products::data::{ProductSort, SortOrder},
        },
        test::{
            TestContext,
            helpers::{create_category, create_product, new_product},
        },
    };

    use super::*;

    fn names(products: &[ProductRecord]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn create_product_round_trips() -> TestResult {
        let ctx = TestContext::new().await;

        let mut product = new_product("Trail Runner", 120_00);
        product.compare_price = Some(150_00);
        product.brand = Some("Stride".to_string());
        product.tags = vec!["running".to_string(), "outdoor".to_string()];
        product.stock = 4;

        let uuid = product.uuid;
        let created = ctx.products.create_product(product).await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(created.price, 120_00);
        assert_eq!(created.compare_price, Some(150_00));
        assert_eq!(created.discount_percentage(), 20);
        assert_eq!(created.tags, vec!["running", "outdoor"]);
        assert_eq!(created.status, ProductStatus::Active);
        assert_eq!(created.rating_average, Decimal::ZERO);
        assert_eq!(created.rating_count, 0);
        assert!(created.in_stock());
        assert!(created.is_low_stock());

        let fetched = ctx.products.get_product(uuid).await?;

        assert_eq!(fetched.name, "Trail Runner");

        Ok(())
    }

    #[tokio::test]
    async fn create_product_unknown_category_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let mut product = new_product("Lost", 10_00);
        product.category = Some(CategoryUuid::new());

        let result = ctx.products.create_product(product).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_blank_name_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx.products.create_product(new_product("", 10_00)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_unknown_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_product_patches_only_given_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = create_product(&ctx, "Mug", 8_00).await?;

        let updated = ctx
            .products
            .update_product(
                product.uuid,
                ProductUpdate {
                    price: Some(7_50),
                    status: Some(ProductStatus::Inactive),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Mug");
        assert_eq!(updated.price, 7_50);
        assert_eq!(updated.status, ProductStatus::Inactive);
        assert!(updated.updated_at >= product.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_hides_it() -> TestResult {
        let ctx = TestContext::new().await;

        let product = create_product(&ctx, "Lamp", 30_00).await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after delete, got {result:?}"
        );

        let again = ctx.products.delete_product(product.uuid).await;

        assert!(
            matches!(again, Err(ProductsServiceError::NotFound)),
            "expected NotFound deleting twice, got {again:?}"
        );

        let listed = ctx.products.list_products(ProductQuery::default()).await?;

        assert_eq!(listed.total_items, 0);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_paginates() -> TestResult {
        let ctx = TestContext::new().await;

        for name in ["A", "B", "C", "D", "E"] {
            create_product(&ctx, name, 10_00).await?;
        }

        let page = ctx
            .products
            .list_products(ProductQuery {
                page: PageRequest::new(2, 2).ok_or("invalid page")?,
                sort_by: ProductSort::Name,
                sort_order: SortOrder::Asc,
                ..ProductQuery::default()
            })
            .await?;

        assert_eq!(names(&page.items), vec!["C", "D"]);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_excludes_inactive() -> TestResult {
        let ctx = TestContext::new().await;

        create_product(&ctx, "Visible", 10_00).await?;

        let mut hidden = new_product("Hidden", 10_00);
        hidden.status = ProductStatus::Archived;
        ctx.products.create_product(hidden).await?;

        let page = ctx.products.list_products(ProductQuery::default()).await?;

        assert_eq!(names(&page.items), vec!["Visible"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters() -> TestResult {
        let ctx = TestContext::new().await;
        let shoes = create_category(&ctx, "Shoes", None).await?;

        let mut runner = new_product("Road Runner", 90_00);
        runner.category = Some(shoes.uuid);
        runner.brand = Some("Stride".to_string());
        runner.tags = vec!["running".to_string()];
        runner.stock = 3;
        runner.featured = true;
        ctx.products.create_product(runner).await?;

        let mut sandal = new_product("Beach Sandal", 20_00);
        sandal.category = Some(shoes.uuid);
        sandal.tags = vec!["summer".to_string()];
        ctx.products.create_product(sandal).await?;

        let mut towel = new_product("Beach Towel", 15_00);
        towel.description = "100% cotton".to_string();
        towel.stock = 12;
        ctx.products.create_product(towel).await?;

        let query = |f: fn(&mut ProductQuery)| {
            let mut query = ProductQuery {
                sort_by: ProductSort::Name,
                sort_order: SortOrder::Asc,
                ..ProductQuery::default()
            };
            f(&mut query);
            query
        };

        let cases: Vec<(ProductQuery, Vec<&str>)> = vec![
            (
                query(|q| q.search = Some("beach".to_string())),
                vec!["Beach Sandal", "Beach Towel"],
            ),
            (
                query(|q| q.search = Some("100%".to_string())),
                vec!["Beach Towel"],
            ),
            (query(|q| q.brand = Some("stri".to_string())), vec!["Road Runner"]),
            (
                query(|q| q.min_price = Some(16_00)),
                vec!["Beach Sandal", "Road Runner"],
            ),
            (
                query(|q| q.max_price = Some(20_00)),
                vec!["Beach Sandal", "Beach Towel"],
            ),
            (query(|q| q.in_stock = true), vec!["Beach Towel", "Road Runner"]),
            (query(|q| q.featured = true), vec!["Road Runner"]),
            (
                query(|q| q.tags = vec!["summer".to_string(), "running".to_string()]),
                vec!["Beach Sandal", "Road Runner"],
            ),
        ];

        for (query, expected) in cases {
            let page = ctx.products.list_products(query.clone()).await?;

            assert_eq!(names(&page.items), expected, "query: {query:?}");
            assert_eq!(page.total_items, expected.len() as u64, "query: {query:?}");
        }

        let by_category = ctx
            .products
            .list_products(ProductQuery {
                category: Some(shoes.uuid),
                sort_by: ProductSort::Price,
                sort_order: SortOrder::Desc,
                ..ProductQuery::default()
            })
            .await?;

        assert_eq!(names(&by_category.items), vec!["Road Runner", "Beach Sandal"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_defaults_to_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        create_product(&ctx, "Older", 10_00).await?;
        create_product(&ctx, "Newer", 10_00).await?;

        let page = ctx.products.list_products(ProductQuery::default()).await?;

        assert_eq!(names(&page.items), vec!["Newer", "Older"]);

        Ok(())
    }

    #[tokio::test]
    async fn featured_products_respects_limit() -> TestResult {
        let ctx = TestContext::new().await;

        for name in ["One", "Two", "Three"] {
            let mut product = new_product(name, 10_00);
            product.featured = true;
            ctx.products.create_product(product).await?;
        }

        create_product(&ctx, "Plain", 10_00).await?;

        let featured = ctx.products.featured_products(2).await?;

        assert_eq!(names(&featured), vec!["Three", "Two"]);

        Ok(())
    }

    #[tokio::test]
    async fn sale_products_skip_ended_sales() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let mut open_ended = new_product("Open Ended", 10_00);
        open_ended.on_sale = true;
        ctx.products.create_product(open_ended).await?;

        let mut running = new_product("Running", 10_00);
        running.on_sale = true;
        running.sale_ends_at = Some(now.checked_add(24.hours())?);
        ctx.products.create_product(running).await?;

        let mut ended = new_product("Ended", 10_00);
        ended.on_sale = true;
        ended.sale_ends_at = Some(now.checked_sub(24.hours())?);
        ctx.products.create_product(ended).await?;

        let mut hidden = new_product("Hidden", 10_00);
        hidden.on_sale = true;
        hidden.status = ProductStatus::Inactive;
        ctx.products.create_product(hidden).await?;

        create_product(&ctx, "Full Price", 10_00).await?;

        let sale = ctx.products.sale_products(10).await?;

        assert_eq!(names(&sale), vec!["Running", "Open Ended"]);

        let limited = ctx.products.sale_products(1).await?;

        assert_eq!(names(&limited), vec!["Running"]);

        let listed = ctx
            .products
            .list_products(ProductQuery {
                on_sale: true,
                sort_by: ProductSort::Name,
                sort_order: SortOrder::Asc,
                ..ProductQuery::default()
            })
            .await?;

        assert_eq!(names(&listed.items), vec!["Ended", "Open Ended", "Running"]);

        Ok(())
    }

    #[tokio::test]
    async fn untracked_products_are_always_in_stock() -> TestResult {
        let ctx = TestContext::new().await;

        let mut download = new_product("Download", 5_00);
        download.track_quantity = false;
        let download = ctx.products.create_product(download).await?;

        assert!(download.in_stock());
        assert!(!download.is_low_stock());

        create_product(&ctx, "Sold Out", 5_00).await?;

        let listed = ctx
            .products
            .list_products(ProductQuery {
                in_stock: true,
                ..ProductQuery::default()
            })
            .await?;

        assert_eq!(names(&listed.items), vec!["Download"]);

        let tracked = ctx
            .products
            .update_product(
                download.uuid,
                ProductUpdate {
                    track_quantity: Some(true),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert!(!tracked.in_stock());

        Ok(())
    }

    #[tokio::test]
    async fn related_products_share_category_tag_or_brand() -> TestResult {
        let ctx = TestContext::new().await;
        let kitchen = create_category(&ctx, "Kitchen", None).await?;

        let mut kettle = new_product("Kettle", 40_00);
        kettle.category = Some(kitchen.uuid);
        kettle.brand = Some("Boil".to_string());
        kettle.tags = vec!["tea".to_string()];
        let kettle = ctx.products.create_product(kettle).await?;

        let mut toaster = new_product("Toaster", 30_00);
        toaster.category = Some(kitchen.uuid);
        ctx.products.create_product(toaster).await?;

        let mut teapot = new_product("Teapot", 25_00);
        teapot.tags = vec!["tea".to_string()];
        ctx.products.create_product(teapot).await?;

        let mut boiler = new_product("Boiler", 500_00);
        boiler.brand = Some("Boil".to_string());
        ctx.products.create_product(boiler).await?;

        create_product(&ctx, "Unrelated", 5_00).await?;

        let related = ctx.products.related_products(kettle.uuid, 10).await?;

        let mut related = names(&related);
        related.sort_unstable();

        assert_eq!(related, vec!["Boiler", "Teapot", "Toaster"]);

        Ok(())
    }

    #[tokio::test]
    async fn related_products_unknown_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.related_products(ProductUuid::new(), 4).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
