//! Order Item Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::Normalize;

/// Order line (订单明细)
///
/// `price` is the unit price at the time of ordering; later menu price
/// changes never touch it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub price: f64,
    pub created_at: i64,
}

/// Create order item payload
///
/// When `price` is omitted the current menu price is copied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemCreate {
    #[serde(default)]
    #[validate(range(min = 1, code = "MISSING_FIELD"))]
    pub order_id: i64,
    #[serde(default)]
    #[validate(range(min = 1, code = "MISSING_FIELD"))]
    pub menu_item_id: i64,
    #[serde(default)]
    #[validate(range(
        min = 1,
        max = 9999,
        code = "INVALID_QUANTITY",
        message = "quantity must be between 1 and 9999"
    ))]
    pub quantity: i64,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1_000_000.0,
        code = "INVALID_PRICE",
        message = "price must be greater than 0 and at most 1000000"
    ))]
    pub price: Option<f64>,
}

/// Update order item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemUpdate {
    #[validate(range(
        min = 1,
        max = 9999,
        code = "INVALID_QUANTITY",
        message = "quantity must be between 1 and 9999"
    ))]
    pub quantity: Option<i64>,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1_000_000.0,
        code = "INVALID_PRICE",
        message = "price must be greater than 0 and at most 1000000"
    ))]
    pub price: Option<f64>,
}

// Nothing to trim; kept so every payload goes through the same pipeline
impl Normalize for OrderItemCreate {
    fn normalize(&mut self) {}
}

impl Normalize for OrderItemUpdate {
    fn normalize(&mut self) {}
}
