//! Order Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{OrderItem, Payment, Receipt};
use crate::order::{DeliveryMode, OrderStatus, PaymentStatus};
use crate::validation::{Normalize, not_blank, trim, trim_opt};

/// Order entity (订单)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub customer_id: Option<i64>,
    /// Human-facing identifier (`TKN...`)
    pub token_number: String,
    pub subtotal: f64,
    pub discount: f64,
    pub final_amount: f64,
    pub status: OrderStatus,
    pub delivery_mode: DeliveryMode,
    pub payment_status: PaymentStatus,
    pub estimated_ready_time: Option<String>,
    /// Checkout idempotency key
    pub request_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload
///
/// Enum fields arrive as strings so that unknown values map to their own
/// error codes instead of a generic body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[validate(range(min = 1, code = "INVALID_REFERENCE", message = "customerId must be positive"))]
    pub customer_id: Option<i64>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub token_number: String,
    #[serde(default)]
    #[validate(range(
        exclusive_min = 0.0,
        code = "INVALID_AMOUNT",
        message = "subtotal must be greater than 0"
    ))]
    pub subtotal: f64,
    #[validate(range(min = 0.0, code = "INVALID_AMOUNT", message = "discount must not be negative"))]
    pub discount: Option<f64>,
    #[serde(default)]
    #[validate(range(
        exclusive_min = 0.0,
        code = "INVALID_AMOUNT",
        message = "finalAmount must be greater than 0"
    ))]
    pub final_amount: f64,
    #[validate(custom(function = "crate::validation::order_status"))]
    pub status: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "crate::validation::delivery_mode"))]
    pub delivery_mode: String,
    #[validate(custom(function = "crate::validation::payment_status"))]
    pub payment_status: Option<String>,
    pub estimated_ready_time: Option<String>,
}

/// Update order payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[validate(range(min = 1, code = "INVALID_REFERENCE", message = "customerId must be positive"))]
    pub customer_id: Option<i64>,
    #[validate(custom(function = "not_blank"))]
    pub token_number: Option<String>,
    #[validate(range(
        exclusive_min = 0.0,
        code = "INVALID_AMOUNT",
        message = "subtotal must be greater than 0"
    ))]
    pub subtotal: Option<f64>,
    #[validate(range(min = 0.0, code = "INVALID_AMOUNT", message = "discount must not be negative"))]
    pub discount: Option<f64>,
    #[validate(range(
        exclusive_min = 0.0,
        code = "INVALID_AMOUNT",
        message = "finalAmount must be greater than 0"
    ))]
    pub final_amount: Option<f64>,
    #[validate(custom(function = "crate::validation::order_status"))]
    pub status: Option<String>,
    #[validate(custom(function = "crate::validation::delivery_mode"))]
    pub delivery_mode: Option<String>,
    #[validate(custom(function = "crate::validation::payment_status"))]
    pub payment_status: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub estimated_ready_time: Option<String>,
}

impl Normalize for OrderCreate {
    fn normalize(&mut self) {
        trim(&mut self.token_number);
        trim_opt(&mut self.status);
        trim(&mut self.delivery_mode);
        trim_opt(&mut self.payment_status);
        trim_opt(&mut self.estimated_ready_time);
    }
}

impl Normalize for OrderUpdate {
    fn normalize(&mut self) {
        trim_opt(&mut self.token_number);
        trim_opt(&mut self.status);
        trim_opt(&mut self.delivery_mode);
        trim_opt(&mut self.payment_status);
        trim_opt(&mut self.estimated_ready_time);
    }
}

/// Order with everything that hangs off it (dashboard / tracking view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub payments: Vec<Payment>,
    pub receipts: Vec<Receipt>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ErrorCode};

    fn valid() -> OrderCreate {
        OrderCreate {
            token_number: "TKN1".into(),
            subtotal: 100.0,
            final_amount: 100.0,
            delivery_mode: "Pickup".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_create_is_valid() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut payload = valid();
        payload.status = Some("Banana".into());
        let err: AppError = payload.validate().unwrap_err().into();
        assert_eq!(err.code, ErrorCode::InvalidStatus);
    }

    #[test]
    fn test_amounts_must_be_positive() {
        let mut payload = valid();
        payload.final_amount = 0.0;
        let err: AppError = payload.validate().unwrap_err().into();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(err.details.unwrap()["field"], "finalAmount");
    }

    #[test]
    fn test_missing_token_is_required() {
        let payload: OrderCreate = serde_json::from_str(
            r#"{"subtotal": 10, "finalAmount": 10, "deliveryMode": "Pickup"}"#,
        )
        .unwrap();
        let err: AppError = payload.validate().unwrap_err().into();
        assert_eq!(err.code, ErrorCode::MissingField);
        assert_eq!(err.message, "tokenNumber is required");
    }

    #[test]
    fn test_detail_flattens_order() {
        let detail = OrderDetail {
            order: Order {
                id: 7,
                customer_id: None,
                token_number: "TKN7".into(),
                subtotal: 10.0,
                discount: 0.0,
                final_amount: 10.0,
                status: OrderStatus::Ready,
                delivery_mode: DeliveryMode::Pickup,
                payment_status: PaymentStatus::Pending,
                estimated_ready_time: None,
                request_id: None,
                created_at: 1,
                updated_at: 1,
            },
            items: vec![],
            payments: vec![],
            receipts: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["tokenNumber"], "TKN7");
        assert_eq!(json["status"], "Ready");
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
