//! Menu Item Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{Normalize, not_blank, trim, trim_opt};

/// Menu item entity (菜品)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub available: bool,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub category: String,
    #[serde(default)]
    #[validate(range(
        exclusive_min = 0.0,
        max = 1_000_000.0,
        code = "INVALID_PRICE",
        message = "price must be greater than 0 and at most 1000000"
    ))]
    pub price: f64,
    /// Defaults to `true`
    pub available: Option<bool>,
    pub description: Option<String>,
    #[validate(url(code = "VALIDATION_FAILED", message = "imageUrl must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub category: Option<String>,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1_000_000.0,
        code = "INVALID_PRICE",
        message = "price must be greater than 0 and at most 1000000"
    ))]
    pub price: Option<f64>,
    pub available: Option<bool>,
    pub description: Option<String>,
    #[validate(url(code = "VALIDATION_FAILED", message = "imageUrl must be a valid URL"))]
    pub image_url: Option<String>,
}

impl Normalize for MenuItemCreate {
    fn normalize(&mut self) {
        trim(&mut self.name);
        trim(&mut self.category);
        trim_opt(&mut self.description);
        trim_opt(&mut self.image_url);
        // Empty optional text means "not provided" on create
        if self.description.as_deref() == Some("") {
            self.description = None;
        }
        if self.image_url.as_deref() == Some("") {
            self.image_url = None;
        }
    }
}

impl Normalize for MenuItemUpdate {
    fn normalize(&mut self) {
        trim_opt(&mut self.name);
        trim_opt(&mut self.category);
        trim_opt(&mut self.description);
        trim_opt(&mut self.image_url);
    }
}
