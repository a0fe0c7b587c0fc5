//! Items

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Variant selector for a line item.
///
/// Two variants are the same when all three fields match; a line added without a variant
/// is equal to one added with an all-empty variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    /// Size, e.g. `"M"`
    pub size: Option<String>,

    /// Colour, e.g. `"red"`
    pub color: Option<String>,

    /// Variant SKU
    pub sku: Option<String>,
}

impl Variant {
    /// Returns `true` when no selector field is set.
    pub fn is_empty(&self) -> bool {
        self.size.is_none() && self.color.is_none() && self.sku.is_none()
    }
}

/// A cart line: one product + variant with a quantity and the unit price captured when the
/// product was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    uuid: Uuid,
    product: Uuid,
    variant: Variant,
    quantity: u32,
    unit_price: u64,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(
        uuid: Uuid,
        product: Uuid,
        variant: Variant,
        quantity: u32,
        unit_price: u64,
    ) -> Self {
        Self {
            uuid,
            product,
            variant,
            quantity,
            unit_price,
        }
    }

    /// Line identifier
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Referenced product
    pub fn product(&self) -> Uuid {
        self.product
    }

    /// Variant selector
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Quantity, always at least one for lines held by a cart.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Captured unit price in minor units.
    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// Unit price multiplied by quantity, or `None` on overflow.
    pub fn line_total(&self) -> Option<u64> {
        self.unit_price.checked_mul(u64::from(self.quantity))
    }

    /// Whether this line holds the given product and variant.
    pub fn matches(&self, product: Uuid, variant: &Variant) -> bool {
        self.product == product && self.variant == *variant
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub(crate) fn set_unit_price(&mut self, unit_price: u64) {
        self.unit_price = unit_price;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = LineItem::new(Uuid::now_v7(), Uuid::now_v7(), Variant::default(), 3, 2_50);

        assert_eq!(item.line_total(), Some(7_50));
    }

    #[test]
    fn line_total_overflow_is_none() {
        let item = LineItem::new(Uuid::now_v7(), Uuid::now_v7(), Variant::default(), 2, u64::MAX);

        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn matches_requires_same_product_and_variant() {
        let product = Uuid::now_v7();
        let red = Variant {
            color: Some("red".to_string()),
            ..Variant::default()
        };

        let item = LineItem::new(Uuid::now_v7(), product, red.clone(), 1, 100);

        assert!(item.matches(product, &red));
        assert!(!item.matches(product, &Variant::default()));
        assert!(!item.matches(Uuid::now_v7(), &red));
    }

    #[test]
    fn empty_variant() {
        assert!(Variant::default().is_empty());
        assert!(
            !Variant {
                sku: Some("SKU-1".to_string()),
                ..Variant::default()
            }
            .is_empty()
        );
    }
}
