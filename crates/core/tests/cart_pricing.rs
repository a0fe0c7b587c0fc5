//! Integration tests for cart mutations and totals recomputation.

use rust_decimal::Decimal;
use testresult::TestResult;
use uuid::Uuid;

use storefront::{
    cart::Cart,
    coupons::{Coupon, CouponDiscount},
    items::Variant,
    orders::OrderPricing,
    pricing::{CartTotals, PricingPolicy},
};

#[test]
fn checkout_flow_recomputes_after_every_mutation() -> TestResult {
    let policy = PricingPolicy::default();
    let mut cart = Cart::default();

    let shirt = Uuid::now_v7();
    let mug = Uuid::now_v7();
    let medium = Variant {
        size: Some("M".to_string()),
        ..Variant::default()
    };

    let shirt_line = cart
        .add_item(Uuid::now_v7(), shirt, medium.clone(), 1, 19_99)?
        .line();

    assert_eq!(
        cart.totals(&policy)?,
        CartTotals {
            total_items: 1,
            total_price: 19_99,
            estimated_tax: 1_60,
            estimated_shipping: 9_99,
            discount: 0,
            estimated_total: 31_58,
        }
    );

    cart.add_item(Uuid::now_v7(), shirt, medium, 1, 19_99)?;
    cart.add_item(Uuid::now_v7(), mug, Variant::default(), 1, 12_50)?;

    // 2 x 19.99 + 12.50 = 52.48, free shipping
    let totals = cart.totals(&policy)?;
    assert_eq!(cart.items().len(), 2);
    assert_eq!(totals.total_items, 3);
    assert_eq!(totals.total_price, 52_48);
    assert_eq!(totals.estimated_tax, 4_20);
    assert_eq!(totals.estimated_shipping, 0);
    assert_eq!(totals.estimated_total, 56_68);

    cart.apply_coupon(Coupon::new("SAVE10", CouponDiscount::Percentage(Decimal::TEN))?);

    // 10% of 52.48 = 5.248
    let totals = cart.totals(&policy)?;
    assert_eq!(totals.discount, 5_25);
    assert_eq!(totals.estimated_total, 51_43);

    cart.update_item(shirt_line, 0)?;

    // Dropping below the threshold brings shipping back
    let totals = cart.totals(&policy)?;
    assert_eq!(totals.total_price, 12_50);
    assert_eq!(totals.estimated_shipping, 9_99);
    assert_eq!(totals.discount, 1_25);

    let pricing = OrderPricing::from(totals);
    assert_eq!(pricing.subtotal, 12_50);
    assert_eq!(pricing.total, 12_50 + 1_00 + 9_99 - 1_25);

    cart.clear();
    assert_eq!(cart.totals(&policy)?, CartTotals::default());

    Ok(())
}

#[test]
fn coupon_on_empty_cart_is_ignored() -> TestResult {
    let mut cart = Cart::default();
    cart.apply_coupon(Coupon::new("FIVE", CouponDiscount::Fixed(5_00))?);

    let totals = cart.totals(&PricingPolicy::default())?;

    assert_eq!(totals, CartTotals::default());
    assert!(cart.coupon().is_some());

    Ok(())
}
