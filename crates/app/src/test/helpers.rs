//! Test Helpers

use storefront::{items::Variant, products::ProductStatus};

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::{CartItemUuid, CartRecord},
        },
        categories::{
            CategoriesService, CategoriesServiceError,
            data::NewCategory,
            records::{CategoryRecord, CategoryUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
    },
    test::TestContext,
};

/// An active, stock-tracked product with no stock, category, brand or tags.
pub(crate) fn new_product(name: &str, price: u64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        compare_price: None,
        category: None,
        brand: None,
        tags: Vec::new(),
        status: ProductStatus::Active,
        stock: 0,
        track_quantity: true,
        featured: false,
        on_sale: false,
        sale_ends_at: None,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products.create_product(new_product(name, price)).await
}

pub(crate) async fn create_category(
    ctx: &TestContext,
    name: &str,
    parent: Option<CategoryUuid>,
) -> Result<CategoryRecord, CategoriesServiceError> {
    ctx.categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: name.to_string(),
            description: None,
            parent,
            sort_order: 0,
        })
        .await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    product: ProductUuid,
    quantity: u32,
    variant: Variant,
) -> Result<CartRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            ctx.user_uuid,
            NewCartItem {
                uuid: CartItemUuid::new(),
                product,
                quantity,
                variant,
            },
        )
        .await
}
