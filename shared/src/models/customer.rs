//! Customer Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{Normalize, lowercase_email, not_blank, trim, trim_opt};

/// Customer entity (顾客)
///
/// `email` is unique and always stored lower-cased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: i64,
}

/// Create customer payload (signup)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        email(code = "INVALID_EMAIL", message = "email address is invalid")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub address: String,
    #[validate(custom(function = "crate::validation::latitude"))]
    pub latitude: Option<f64>,
    #[validate(custom(function = "crate::validation::longitude"))]
    pub longitude: Option<f64>,
}

/// Update customer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(
        custom(function = "not_blank"),
        email(code = "INVALID_EMAIL", message = "email address is invalid")
    )]
    pub email: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub phone: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub address: Option<String>,
    #[validate(custom(function = "crate::validation::latitude"))]
    pub latitude: Option<f64>,
    #[validate(custom(function = "crate::validation::longitude"))]
    pub longitude: Option<f64>,
}

impl Normalize for CustomerCreate {
    fn normalize(&mut self) {
        trim(&mut self.name);
        lowercase_email(&mut self.email);
        trim(&mut self.phone);
        trim(&mut self.address);
    }
}

impl Normalize for CustomerUpdate {
    fn normalize(&mut self) {
        trim_opt(&mut self.name);
        if let Some(email) = self.email.as_mut() {
            lowercase_email(email);
        }
        trim_opt(&mut self.phone);
        trim_opt(&mut self.address);
    }
}
