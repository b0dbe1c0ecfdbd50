//! Checkout payloads
//!
//! One request creates the order, its lines, the payment and a receipt.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Order, OrderItem, Payment, Receipt};
use crate::validation::{Normalize, not_blank, trim, trim_opt};

/// Maximum number of distinct lines in a single cart
pub const MAX_CART_LINES: u64 = 50;

/// Cart line: which menu item and how many. The unit price always comes
/// from the menu, never from the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
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
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Client-generated idempotency key
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub request_id: String,
    #[validate(range(min = 1, code = "INVALID_REFERENCE", message = "customerId must be positive"))]
    pub customer_id: Option<i64>,
    #[serde(default)]
    #[validate(custom(function = "crate::validation::delivery_mode"))]
    pub delivery_mode: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub payment_mode: String,
    #[validate(range(min = 1, code = "INVALID_REFERENCE", message = "offerId must be positive"))]
    pub offer_id: Option<i64>,
    pub estimated_ready_time: Option<String>,
    #[serde(default)]
    #[validate(
        length(
            min = 1,
            max = 50,
            code = "EMPTY_CART",
            message = "cart must contain between 1 and 50 lines"
        ),
        nested
    )]
    pub items: Vec<CartLine>,
}

impl Normalize for CheckoutRequest {
    fn normalize(&mut self) {
        trim(&mut self.request_id);
        trim(&mut self.delivery_mode);
        trim(&mut self.payment_mode);
        trim_opt(&mut self.estimated_ready_time);
        if self.estimated_ready_time.as_deref() == Some("") {
            self.estimated_ready_time = None;
        }
    }
}

/// Everything a checkout wrote (or, on replay, had written earlier)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub payment: Option<Payment>,
    pub receipt: Option<Receipt>,
    /// `true` when the request id had already been processed
    pub replayed: bool,
}
