//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, catcher::Catcher, prelude::*};
use storefront::{pricing::CartTotals, products::ProductStatus};
use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartRecord, CartUuid},
        },
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        orders::MockOrdersService,
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        reviews::MockReviewsService,
        rides::MockRidesService,
        users::{MockUsersService, records::UserUuid},
    },
};
use uuid::Uuid;

use crate::{catcher::EnvelopeCatcher, extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service. Mocks without expectations fail any call made to them.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) users: MockUsersService,
    pub(crate) products: MockProductsService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) reviews: MockReviewsService,
    pub(crate) rides: MockRidesService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            products: Arc::new(self.products),
            categories: Arc::new(self.categories),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            reviews: Arc::new(self.reviews),
            rides: Arc::new(self.rides),
        })
    }

    /// Serves `route` as an authenticated user, rendering errors through the envelope catcher.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
        .catcher(Catcher::default().hoop(EnvelopeCatcher::new(false)))
    }
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Mocks {
        products,
        ..Mocks::default()
    }
    .service(route)
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    Mocks {
        categories,
        ..Mocks::default()
    }
    .service(route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Mocks {
        carts,
        ..Mocks::default()
    }
    .service(route)
}

pub(crate) fn timestamp() -> Timestamp {
    Timestamp::UNIX_EPOCH
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Canvas Tote".to_string(),
        description: "A sturdy everyday bag".to_string(),
        price: 25_00,
        compare_price: Some(50_00),
        category: None,
        brand: Some("Acme".to_string()),
        tags: vec!["bags".to_string()],
        status: ProductStatus::Active,
        stock: 5,
        track_quantity: true,
        featured: false,
        on_sale: false,
        sale_ends_at: None,
        rating_average: Decimal::new(45, 1),
        rating_count: 2,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub(crate) fn make_category(
    uuid: CategoryUuid,
    name: &str,
    parent: Option<CategoryUuid>,
) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: name.to_string(),
        slug: storefront::categories::slugify(name),
        description: None,
        parent,
        level: u32::from(parent.is_some()),
        path: parent.map(|parent| parent.to_string()).unwrap_or_default(),
        is_active: true,
        sort_order: 0,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub(crate) fn empty_cart() -> CartRecord {
    CartRecord {
        uuid: CartUuid::new(),
        user: TEST_USER_UUID,
        items: vec![],
        coupon: None,
        totals: CartTotals::default(),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}
