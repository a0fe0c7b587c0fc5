//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AddOutcome, Cart, CartError, UpdateOutcome},
    categories::{Placement, TreeNode, build_tree, slugify},
    coupons::{Coupon, CouponDiscount, CouponError, CouponKind},
    discounts::{DiscountError, percent_of_minor, percent_points_of_minor},
    items::{LineItem, Variant},
    orders::{OrderError, OrderPricing, OrderStatus, order_number},
    pricing::{CartTotals, PricingError, PricingPolicy, calculate_totals},
    products::{
        ProductError, ProductStatus, covers_quantity, discount_percentage, in_stock, is_low_stock,
    },
    ratings::{RatingError, RatingSummary, summarize, validate_rating},
};
