//! Cart
//!
//! An in-memory cart: ordered line items plus an optional coupon. The persisted cart in
//! `storefront-app` loads into this type, applies one operation, and writes the lines and
//! [`CartTotals`] back.

use std::num::TryFromIntError;

use thiserror::Error;
use uuid::Uuid;

use crate::{
    coupons::Coupon,
    items::{LineItem, Variant},
    pricing::{CartTotals, PricingError, PricingPolicy, calculate_totals},
};

/// Errors raised by cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantity must be at least one when adding.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Merged quantity does not fit.
    #[error("quantity overflowed")]
    QuantityOverflow,

    /// Requested quantity does not fit a line.
    #[error("quantity out of range")]
    QuantityOutOfRange(#[from] TryFromIntError),

    /// No line with the given identifier.
    #[error("cart line {0} not found")]
    LineNotFound(Uuid),
}

/// Result of [`Cart::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added(Uuid),

    /// An existing line with the same product and variant was incremented.
    Merged(Uuid),
}

impl AddOutcome {
    /// Identifier of the affected line.
    pub fn line(self) -> Uuid {
        match self {
            AddOutcome::Added(uuid) | AddOutcome::Merged(uuid) => uuid,
        }
    }
}

/// Result of [`Cart::update_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The line now holds the new quantity.
    Updated,

    /// The quantity was zero or negative, so the line was removed.
    Removed,
}

/// Cart lines and coupon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
    coupon: Option<Coupon>,
}

impl Cart {
    /// Creates a cart from existing lines and coupon.
    pub fn new(items: Vec<LineItem>, coupon: Option<Coupon>) -> Self {
        Self { items, coupon }
    }

    /// Lines in insertion order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Applied coupon, if any
    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Returns `true` when the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds a line by identifier.
    pub fn line(&self, uuid: Uuid) -> Option<&LineItem> {
        self.items.iter().find(|item| item.uuid() == uuid)
    }

    /// Adds `quantity` of a product variant at `unit_price`.
    ///
    /// A line for the same product and variant is incremented and its captured price is
    /// refreshed to `unit_price`; otherwise a new line with identifier `uuid` is appended.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit in a `u32`.
    pub fn add_item(
        &mut self,
        uuid: Uuid,
        product: Uuid,
        variant: Variant,
        quantity: u32,
        unit_price: u64,
    ) -> Result<AddOutcome, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.matches(product, &variant))
        {
            let merged = existing
                .quantity()
                .checked_add(quantity)
                .ok_or(CartError::QuantityOverflow)?;

            existing.set_quantity(merged);
            existing.set_unit_price(unit_price);

            return Ok(AddOutcome::Merged(existing.uuid()));
        }

        self.items
            .push(LineItem::new(uuid, product, variant, quantity, unit_price));

        Ok(AddOutcome::Added(uuid))
    }

    /// Sets the quantity of a line; zero or below removes it.
    ///
    /// # Errors
    ///
    /// - [`CartError::LineNotFound`]: no line has the given identifier.
    /// - [`CartError::QuantityOutOfRange`]: the quantity does not fit in a `u32`.
    pub fn update_item(&mut self, line: Uuid, quantity: i64) -> Result<UpdateOutcome, CartError> {
        let position = self.position(line)?;

        if quantity <= 0 {
            self.items.remove(position);

            return Ok(UpdateOutcome::Removed);
        }

        let quantity = u32::try_from(quantity)?;

        if let Some(item) = self.items.get_mut(position) {
            item.set_quantity(quantity);
        }

        Ok(UpdateOutcome::Updated)
    }

    /// Removes a line, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has the given identifier.
    pub fn remove_item(&mut self, line: Uuid) -> Result<LineItem, CartError> {
        let position = self.position(line)?;

        Ok(self.items.remove(position))
    }

    /// Removes every line and the coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon = None;
    }

    /// Applies a coupon, replacing any previous one.
    pub fn apply_coupon(&mut self, coupon: Coupon) {
        self.coupon = Some(coupon);
    }

    /// Removes the coupon, returning it.
    pub fn remove_coupon(&mut self) -> Option<Coupon> {
        self.coupon.take()
    }

    /// Recomputes the derived totals.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the totals cannot be computed.
    pub fn totals(&self, policy: &PricingPolicy) -> Result<CartTotals, PricingError> {
        calculate_totals(&self.items, self.coupon.as_ref(), policy)
    }

    fn position(&self, line: Uuid) -> Result<usize, CartError> {
        self.items
            .iter()
            .position(|item| item.uuid() == line)
            .ok_or(CartError::LineNotFound(line))
    }
}
