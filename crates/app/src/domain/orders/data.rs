//! Order Data

use crate::domain::orders::records::OrderUuid;

/// New Order Data
///
/// Lines and pricing are taken from the user's cart when the order is placed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub notes: Option<String>,
}
