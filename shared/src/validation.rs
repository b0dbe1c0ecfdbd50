//! Payload normalization and custom validation rules
//!
//! Every create/update payload implements [`Normalize`] (trim text, lower-case
//! emails, canonicalize timestamps) and `validator::Validate`. Rules below are
//! referenced from the `#[validate(custom(...))]` attributes on the models.

use std::borrow::Cow;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use validator::ValidationError;

use crate::order::{DeliveryMode, OrderStatus, PaymentStatus};

/// In-place normalization applied before validation
pub trait Normalize {
    fn normalize(&mut self);
}

pub fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub fn trim_opt(value: &mut Option<String>) {
    if let Some(v) = value {
        trim(v);
    }
}

pub fn lowercase_email(value: &mut String) {
    trim(value);
    *value = value.to_lowercase();
}

/// Parse an RFC 3339 timestamp and render it in canonical UTC form
/// (`2025-01-31T18:00:00.000Z`), which keeps lexical and chronological
/// order identical in the database.
pub fn canonical_timestamp(value: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Canonicalize in place; unparseable input is left for validation to reject
pub fn canonicalize_timestamp(value: &mut String) {
    if let Some(canonical) = canonical_timestamp(value) {
        *value = canonical;
    }
}

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

// ── custom rules ────────────────────────────────────────────────────

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("MISSING_FIELD", "value must not be empty"));
    }
    Ok(())
}

pub fn latitude(value: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&value) {
        return Err(error("INVALID_COORDINATES", "latitude must be between -90 and 90"));
    }
    Ok(())
}

pub fn longitude(value: f64) -> Result<(), ValidationError> {
    if !(-180.0..=180.0).contains(&value) {
        return Err(error(
            "INVALID_COORDINATES",
            "longitude must be between -180 and 180",
        ));
    }
    Ok(())
}

pub fn rfc3339(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if DateTime::parse_from_rfc3339(value.trim()).is_err() {
        return Err(error(
            "INVALID_TIMESTAMP",
            format!("'{value}' is not an RFC 3339 timestamp"),
        ));
    }
    Ok(())
}

pub fn order_status(value: &str) -> Result<(), ValidationError> {
    OrderStatus::from_str(value)
        .map(|_| ())
        .map_err(|e| error("INVALID_STATUS", e.to_string()))
}

pub fn delivery_mode(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    DeliveryMode::from_str(value)
        .map(|_| ())
        .map_err(|e| error("INVALID_DELIVERY_MODE", e.to_string()))
}

pub fn payment_status(value: &str) -> Result<(), ValidationError> {
    PaymentStatus::from_str(value)
        .map(|_| ())
        .map_err(|e| error("INVALID_PAYMENT_STATUS", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_lowercase() {
        let mut s = "  Jane@Example.COM ".to_string();
        lowercase_email(&mut s);
        assert_eq!(s, "jane@example.com");

        let mut opt = Some("  x ".to_string());
        trim_opt(&mut opt);
        assert_eq!(opt.as_deref(), Some("x"));
    }

    #[test]
    fn test_canonical_timestamp() {
        assert_eq!(
            canonical_timestamp("2025-01-31T20:00:00+02:00").as_deref(),
            Some("2025-01-31T18:00:00.000Z")
        );
        assert!(canonical_timestamp("next tuesday").is_none());
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("a").is_ok());
        let err = not_blank("   ").unwrap_err();
        assert_eq!(err.code, "MISSING_FIELD");
    }

    #[test]
    fn test_enum_rules() {
        assert!(order_status("Preparing").is_ok());
        assert_eq!(order_status("Banana").unwrap_err().code, "INVALID_STATUS");
        assert!(delivery_mode("Pickup").is_ok());
        assert_eq!(
            delivery_mode("Teleport").unwrap_err().code,
            "INVALID_DELIVERY_MODE"
        );
        assert!(payment_status("Paid").is_ok());
        assert!(rfc3339("2025-01-01T00:00:00Z").is_ok());
        assert!(latitude(90.0).is_ok());
        assert_eq!(latitude(91.0).unwrap_err().code, "INVALID_COORDINATES");
        assert!(longitude(-180.0).is_ok());
        assert!(longitude(f64::NAN).is_err());
        assert_eq!(rfc3339("2025-13-01").unwrap_err().code, "INVALID_TIMESTAMP");
        assert_eq!(rfc3339("").unwrap_err().code, "MISSING_FIELD");
        assert_eq!(delivery_mode(" ").unwrap_err().code, "MISSING_FIELD");
    }
}
