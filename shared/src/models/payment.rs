//! Payment Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::order::PaymentStatus;
use crate::validation::{Normalize, not_blank, trim, trim_opt};

/// Payment entity (支付记录)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    pub transaction_id: String,
    /// Free text (`Cash`, `Card`, `UPI`, ...)
    pub payment_mode: String,
    pub amount_paid: f64,
    pub payment_status: PaymentStatus,
    pub created_at: i64,
}

/// Create payment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    #[serde(default)]
    #[validate(range(min = 1, code = "MISSING_FIELD"))]
    pub order_id: i64,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub transaction_id: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub payment_mode: String,
    #[serde(default)]
    #[validate(range(
        exclusive_min = 0.0,
        code = "INVALID_AMOUNT",
        message = "amountPaid must be greater than 0"
    ))]
    pub amount_paid: f64,
    /// Defaults to `Pending`
    #[validate(custom(function = "crate::validation::payment_status"))]
    pub payment_status: Option<String>,
}

/// Update payment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdate {
    #[validate(custom(function = "not_blank"))]
    pub transaction_id: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub payment_mode: Option<String>,
    #[validate(range(
        exclusive_min = 0.0,
        code = "INVALID_AMOUNT",
        message = "amountPaid must be greater than 0"
    ))]
    pub amount_paid: Option<f64>,
    #[validate(custom(function = "crate::validation::payment_status"))]
    pub payment_status: Option<String>,
}

impl Normalize for PaymentCreate {
    fn normalize(&mut self) {
        trim(&mut self.transaction_id);
        trim(&mut self.payment_mode);
        trim_opt(&mut self.payment_status);
    }
}

impl Normalize for PaymentUpdate {
    fn normalize(&mut self) {
        trim_opt(&mut self.transaction_id);
        trim_opt(&mut self.payment_mode);
        trim_opt(&mut self.payment_status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ErrorCode};

    #[test]
    fn test_payment_status_rule() {
        let update = PaymentUpdate {
            payment_status: Some("Paid".into()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());

        let update = PaymentUpdate {
            payment_status: Some("Someday".into()),
            ..Default::default()
        };
        let err: AppError = update.validate().unwrap_err().into();
        assert_eq!(err.code, ErrorCode::InvalidPaymentStatus);
    }
}
