//! Shared enums for orders and payments

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};

// ============================================================================
// Parse error
// ============================================================================

/// A string that does not name any variant of a wire enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub code: ErrorCode,
    pub field: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(code: ErrorCode, field: &'static str, value: &str) -> Self {
        Self {
            code,
            field,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.field, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

impl From<ParseEnumError> for AppError {
    fn from(e: ParseEnumError) -> Self {
        AppError::with_message(e.code, e.to_string()).with_detail("field", e.field)
    }
}

// ============================================================================
// Delivery Mode
// ============================================================================

/// 取餐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum DeliveryMode {
    /// 到店自取
    #[default]
    Pickup,
    /// 外送
    Delivery,
}

impl DeliveryMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Pickup => "Pickup",
            DeliveryMode::Delivery => "Delivery",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pickup" => Ok(DeliveryMode::Pickup),
            "delivery" => Ok(DeliveryMode::Delivery),
            _ => Err(ParseEnumError::new(
                ErrorCode::InvalidDeliveryMode,
                "deliveryMode",
                s,
            )),
        }
    }
}

// ============================================================================
// Payment Status
// ============================================================================

/// 支付状态
///
/// `Paid` is accepted on input as a synonym of `Completed`; only
/// `Completed` is ever stored or returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum PaymentStatus {
    /// 待支付 (cash on pickup / delivery)
    #[default]
    Pending,
    /// 已支付
    #[serde(alias = "Paid")]
    Completed,
    /// 支付失败
    Failed,
    /// 已退款
    Refunded,
}

impl PaymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Refunded => "Refunded",
        }
    }

    /// Status a fresh checkout starts with for the given payment mode
    pub fn for_payment_mode(mode: &str) -> Self {
        if mode.trim().eq_ignore_ascii_case("cash") {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Completed
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" | "paid" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(ParseEnumError::new(
                ErrorCode::InvalidPaymentStatus,
                "paymentStatus",
                s,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_is_completed() {
        assert_eq!("Paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Completed);
        let status: PaymentStatus = serde_json::from_str("\"Paid\"").unwrap();
        assert_eq!(status, PaymentStatus::Completed);
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Completed).unwrap(),
            "\"Completed\""
        );
    }

    #[test]
    fn test_payment_status_for_mode() {
        assert_eq!(PaymentStatus::for_payment_mode("Cash"), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::for_payment_mode(" cash "), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::for_payment_mode("Card"), PaymentStatus::Completed);
        assert_eq!(PaymentStatus::for_payment_mode("UPI"), PaymentStatus::Completed);
    }

    #[test]
    fn test_delivery_mode_parse() {
        assert_eq!("pickup".parse::<DeliveryMode>().unwrap(), DeliveryMode::Pickup);
        assert_eq!("Delivery".parse::<DeliveryMode>().unwrap(), DeliveryMode::Delivery);
        let err = "Drone".parse::<DeliveryMode>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDeliveryMode);
    }

    #[test]
    fn test_parse_error_into_app_error() {
        let err: AppError = "Nope".parse::<PaymentStatus>().unwrap_err().into();
        assert_eq!(err.code, ErrorCode::InvalidPaymentStatus);
        assert_eq!(err.message, "invalid paymentStatus: 'Nope'");
    }
}
