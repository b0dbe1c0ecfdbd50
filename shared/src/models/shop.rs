//! Shop Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{Normalize, lowercase_email, not_blank, trim, trim_opt};

/// Shop entity (门店)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub opening_hours: Option<String>,
    pub created_at: i64,
}

/// Create shop payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShopCreate {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub address: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    #[validate(email(code = "INVALID_EMAIL", message = "email address is invalid"))]
    pub email: Option<String>,
    pub opening_hours: Option<String>,
}

/// Update shop payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShopUpdate {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub address: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub phone: Option<String>,
    #[validate(email(code = "INVALID_EMAIL", message = "email address is invalid"))]
    pub email: Option<String>,
    pub opening_hours: Option<String>,
}

impl Normalize for ShopCreate {
    fn normalize(&mut self) {
        trim(&mut self.name);
        trim(&mut self.address);
        trim(&mut self.phone);
        if let Some(email) = self.email.as_mut() {
            lowercase_email(email);
        }
        trim_opt(&mut self.opening_hours);
    }
}

impl Normalize for ShopUpdate {
    fn normalize(&mut self) {
        trim_opt(&mut self.name);
        trim_opt(&mut self.address);
        trim_opt(&mut self.phone);
        if let Some(email) = self.email.as_mut() {
            lowercase_email(email);
        }
        trim_opt(&mut self.opening_hours);
    }
}
