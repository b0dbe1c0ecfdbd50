//! Payload validation
//!
//! Every create/update payload runs the same pipeline: trim and lower-case
//! through [`Normalize`], then the declarative `validator` rules. The first
//! failing field becomes the error (see `From<ValidationErrors> for AppError`).

use shared::Normalize;
use validator::Validate;

use crate::utils::AppResult;

/// Normalize, then validate; returns the cleaned payload
pub fn validate_payload<T: Normalize + Validate>(mut payload: T) -> AppResult<T> {
    payload.normalize();
    payload.validate()?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;
    use shared::models::{CustomerCreate, MenuItemCreate};

    #[test]
    fn test_email_lowercased_before_validation() {
        let payload = CustomerCreate {
            name: " Jane ".into(),
            email: "  JANE@Example.com ".into(),
            phone: "555-0100".into(),
            address: "1 Main St".into(),
            latitude: Some(12.97),
            longitude: Some(77.59),
        };
        let payload = validate_payload(payload).unwrap();
        assert_eq!(payload.name, "Jane");
        assert_eq!(payload.email, "jane@example.com");
    }

    #[test]
    fn test_blank_after_trim_is_missing() {
        let payload = MenuItemCreate {
            name: "   ".into(),
            category: "Mains".into(),
            price: 10.0,
            ..Default::default()
        };
        let err = validate_payload(payload).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingField);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_zero_price_rejected() {
        let payload = MenuItemCreate {
            name: "Burger".into(),
            category: "Mains".into(),
            price: 0.0,
            ..Default::default()
        };
        let err = validate_payload(payload).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrice);
    }

    #[test]
    fn test_bad_coordinates() {
        let payload = CustomerCreate {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            phone: "555".into(),
            address: "x".into(),
            latitude: Some(120.0),
            longitude: None,
        };
        let err = validate_payload(payload).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoordinates);
    }
}
