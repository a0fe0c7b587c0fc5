//! Products

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Stock at or below which a product counts as low stock.
pub const LOW_STOCK_THRESHOLD: u64 = 10;

/// Errors parsing product values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// Unknown status string.
    #[error("unknown product status: {0}")]
    UnknownStatus(String),
}

/// Catalogue status of a product. Only active products can be listed or added to carts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProductStatus {
    /// Visible and purchasable.
    #[default]
    Active,

    /// Hidden from the catalogue.
    Inactive,

    /// Retired.
    Archived,
}

impl ProductStatus {
    /// Persisted/wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Archived => "archived",
        }
    }

    /// Whether the product can be sold.
    pub fn is_active(self) -> bool {
        self == ProductStatus::Active
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            "archived" => Ok(ProductStatus::Archived),
            other => Err(ProductError::UnknownStatus(other.to_string())),
        }
    }
}

/// Whole percent saved against the compare-at price, rounded half up.
///
/// Zero when there is no compare-at price or it does not exceed the price.
pub fn discount_percentage(price: u64, compare_price: Option<u64>) -> u64 {
    match compare_price {
        Some(compare) if compare > price => {
            let saved = u128::from(compare - price);
            let compare = u128::from(compare);

            // (saved * 100 + compare / 2) / compare, in integers
            let percent = (saved * 100 + compare / 2) / compare;

            u64::try_from(percent).unwrap_or(100)
        }
        _ => 0,
    }
}

/// Whether the product can be bought. Untracked products are always in stock.
pub fn in_stock(stock: u64, track_quantity: bool) -> bool {
    !track_quantity || stock > 0
}

/// Whether tracked stock has dropped to the low stock threshold.
pub fn is_low_stock(stock: u64, track_quantity: bool) -> bool {
    track_quantity && stock <= LOW_STOCK_THRESHOLD
}

/// Whether stock covers `quantity` units. Untracked products cover any quantity.
pub fn covers_quantity(stock: u64, track_quantity: bool, quantity: u64) -> bool {
    !track_quantity || stock >= quantity
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn discount_percentage_rounds() {
        assert_eq!(discount_percentage(75_00, Some(100_00)), 25);
        // 1/3 saved
        assert_eq!(discount_percentage(20_00, Some(30_00)), 33);
        // 2/3 saved
        assert_eq!(discount_percentage(10_00, Some(30_00)), 67);
        // 12.5% rounds up
        assert_eq!(discount_percentage(87_50, Some(100_00)), 13);
    }

    #[test]
    fn discount_percentage_without_saving_is_zero() {
        assert_eq!(discount_percentage(10_00, None), 0);
        assert_eq!(discount_percentage(10_00, Some(10_00)), 0);
        assert_eq!(discount_percentage(10_00, Some(5_00)), 0);
    }

    #[test]
    fn stock_flags() {
        assert!(!in_stock(0, true));
        assert!(in_stock(1, true));
        assert!(is_low_stock(10, true));
        assert!(!is_low_stock(11, true));
    }

    #[test]
    fn untracked_stock_is_never_short() {
        assert!(in_stock(0, false));
        assert!(!is_low_stock(0, false));
        assert!(covers_quantity(0, false, 50));
        assert!(!covers_quantity(2, true, 3));
        assert!(covers_quantity(3, true, 3));
    }

    #[test]
    fn status_parses() -> TestResult {
        assert_eq!("archived".parse::<ProductStatus>()?, ProductStatus::Archived);
        assert!(ProductStatus::Active.is_active());
        assert!(!ProductStatus::Inactive.is_active());
        assert!("deleted".parse::<ProductStatus>().is_err());

        Ok(())
    }
}
