//! Receipt Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{Normalize, not_blank, trim, trim_opt};

/// Receipt entity (小票)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: i64,
    pub order_id: i64,
    pub receipt_data: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptCreate {
    #[serde(default)]
    #[validate(range(min = 1, code = "MISSING_FIELD"))]
    pub order_id: i64,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub receipt_data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptUpdate {
    #[validate(custom(function = "not_blank"))]
    pub receipt_data: Option<String>,
}

impl Normalize for ReceiptCreate {
    fn normalize(&mut self) {
        trim(&mut self.receipt_data);
    }
}

impl Normalize for ReceiptUpdate {
    fn normalize(&mut self) {
        trim_opt(&mut self.receipt_data);
    }
}
