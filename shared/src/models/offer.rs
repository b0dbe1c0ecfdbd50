//! Offer Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult, ErrorCode};
use crate::validation::{Normalize, canonicalize_timestamp, not_blank, rfc3339, trim};

/// Offer entity (优惠)
///
/// `valid_from` / `valid_until` are stored as canonical UTC RFC 3339 strings,
/// so string comparison matches time order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: i64,
    pub title: String,
    pub discount_percent: f64,
    pub valid_from: String,
    pub valid_until: String,
    pub created_at: i64,
}

impl Offer {
    /// Whether the offer window contains `now` (canonical RFC 3339)
    pub fn is_active_at(&self, now: &str) -> bool {
        self.valid_from.as_str() <= now && now <= self.valid_until.as_str()
    }
}

/// Reject windows that end before they start
pub fn check_window(valid_from: &str, valid_until: &str) -> AppResult<()> {
    if valid_until < valid_from {
        return Err(AppError::with_message(
            ErrorCode::InvalidDateRange,
            "validUntil must not be earlier than validFrom",
        )
        .with_detail("field", "validUntil"));
    }
    Ok(())
}

/// Create offer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OfferCreate {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(default)]
    #[validate(range(
        min = 0.0,
        max = 100.0,
        code = "INVALID_DISCOUNT",
        message = "discountPercent must be between 0 and 100"
    ))]
    pub discount_percent: f64,
    #[serde(default)]
    #[validate(custom(function = "rfc3339"))]
    pub valid_from: String,
    #[serde(default)]
    #[validate(custom(function = "rfc3339"))]
    pub valid_until: String,
}

/// Update offer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OfferUpdate {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(range(
        min = 0.0,
        max = 100.0,
        code = "INVALID_DISCOUNT",
        message = "discountPercent must be between 0 and 100"
    ))]
    pub discount_percent: Option<f64>,
    #[validate(custom(function = "rfc3339"))]
    pub valid_from: Option<String>,
    #[validate(custom(function = "rfc3339"))]
    pub valid_until: Option<String>,
}

impl Normalize for OfferCreate {
    fn normalize(&mut self) {
        trim(&mut self.title);
        canonicalize_timestamp(&mut self.valid_from);
        canonicalize_timestamp(&mut self.valid_until);
    }
}

impl Normalize for OfferUpdate {
    fn normalize(&mut self) {
        if let Some(title) = self.title.as_mut() {
            trim(title);
        }
        if let Some(from) = self.valid_from.as_mut() {
            canonicalize_timestamp(from);
        }
        if let Some(until) = self.valid_until.as_mut() {
            canonicalize_timestamp(until);
        }
    }
}
