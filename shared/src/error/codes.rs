//! Unified error codes for the food ordering service
//!
//! Every code has a stable numeric value (used for categorisation) and a
//! symbolic SCREAMING_SNAKE name, which is what goes over the wire.
//! Codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Customer errors
//! - 2xxx: Shop errors
//! - 3xxx: Menu / offer errors
//! - 4xxx: Order errors
//! - 5xxx: Payment / receipt errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Malformed request (bad JSON, bad query string)
    InvalidRequest = 5,
    /// Required field missing
    MissingField = 7,
    /// `id` query parameter missing
    MissingId = 9,
    /// Referenced parent row does not exist
    InvalidReference = 10,
    /// Row is still referenced by child rows
    ReferenceInUse = 11,

    // ==================== 1xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 1001,
    /// Email already registered
    DuplicateEmail = 1002,
    /// Email is malformed
    InvalidEmail = 1003,
    /// Latitude / longitude out of range
    InvalidCoordinates = 1004,

    // ==================== 2xxx: Shop ====================
    /// Shop not found
    ShopNotFound = 2001,

    // ==================== 3xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 3001,
    /// Price must be positive
    InvalidPrice = 3002,
    /// Menu item is not available for ordering
    MenuItemUnavailable = 3003,
    /// Offer not found
    OfferNotFound = 3101,
    /// Discount percent outside [0, 100]
    InvalidDiscount = 3102,
    /// Timestamp could not be parsed
    InvalidTimestamp = 3103,
    /// validUntil precedes validFrom
    InvalidDateRange = 3104,
    /// Offer is outside its validity window
    OfferNotActive = 3105,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Token number already used
    DuplicateTokenNumber = 4002,
    /// Status is not a known order status
    InvalidStatus = 4003,
    /// Status change not allowed from the current status
    InvalidStatusTransition = 4004,
    /// Status changed concurrently
    OrderStatusConflict = 4005,
    /// Delivery mode is not Pickup / Delivery
    InvalidDeliveryMode = 4006,
    /// Monetary amount out of range
    InvalidAmount = 4007,
    /// Order item not found
    OrderItemNotFound = 4101,
    /// Quantity must be a positive integer
    InvalidQuantity = 4102,
    /// Checkout without any line
    EmptyCart = 4103,

    // ==================== 5xxx: Payment ====================
    /// Payment not found
    PaymentNotFound = 5001,
    /// Transaction id already used
    DuplicateTransactionId = 5002,
    /// Unknown payment status
    InvalidPaymentStatus = 5003,
    /// Receipt not found
    ReceiptNotFound = 5101,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Symbolic name sent to clients
    pub const fn symbol(&self) -> &'static str {
        match self {
            ErrorCode::Success => "SUCCESS",
            ErrorCode::Unknown => "UNKNOWN",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::MissingField => "MISSING_FIELD",
            ErrorCode::MissingId => "MISSING_ID",
            ErrorCode::InvalidReference => "INVALID_REFERENCE",
            ErrorCode::ReferenceInUse => "REFERENCE_IN_USE",

            ErrorCode::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::InvalidCoordinates => "INVALID_COORDINATES",

            ErrorCode::ShopNotFound => "SHOP_NOT_FOUND",

            ErrorCode::MenuItemNotFound => "MENU_ITEM_NOT_FOUND",
            ErrorCode::InvalidPrice => "INVALID_PRICE",
            ErrorCode::MenuItemUnavailable => "MENU_ITEM_UNAVAILABLE",
            ErrorCode::OfferNotFound => "OFFER_NOT_FOUND",
            ErrorCode::InvalidDiscount => "INVALID_DISCOUNT",
            ErrorCode::InvalidTimestamp => "INVALID_TIMESTAMP",
            ErrorCode::InvalidDateRange => "INVALID_DATE_RANGE",
            ErrorCode::OfferNotActive => "OFFER_NOT_ACTIVE",

            ErrorCode::OrderNotFound => "ORDER_NOT_FOUND",
            ErrorCode::DuplicateTokenNumber => "DUPLICATE_TOKEN_NUMBER",
            ErrorCode::InvalidStatus => "INVALID_STATUS",
            ErrorCode::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            ErrorCode::OrderStatusConflict => "ORDER_STATUS_CONFLICT",
            ErrorCode::InvalidDeliveryMode => "INVALID_DELIVERY_MODE",
            ErrorCode::InvalidAmount => "INVALID_AMOUNT",
            ErrorCode::OrderItemNotFound => "ORDER_ITEM_NOT_FOUND",
            ErrorCode::InvalidQuantity => "INVALID_QUANTITY",
            ErrorCode::EmptyCart => "EMPTY_CART",

            ErrorCode::PaymentNotFound => "PAYMENT_NOT_FOUND",
            ErrorCode::DuplicateTransactionId => "DUPLICATE_TRANSACTION_ID",
            ErrorCode::InvalidPaymentStatus => "INVALID_PAYMENT_STATUS",
            ErrorCode::ReceiptNotFound => "RECEIPT_NOT_FOUND",

            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Look up a code by its symbolic name
    ///
    /// Used to carry codes declared on validation rules (which are plain
    /// strings) back into the typed enum.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(symbol.to_string())).ok()
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::MissingField => "Required field is missing",
            ErrorCode::MissingId => "Query parameter 'id' is required",
            ErrorCode::InvalidReference => "Referenced record does not exist",
            ErrorCode::ReferenceInUse => "Record is still referenced by other records",

            // Customer
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::DuplicateEmail => "Email is already registered",
            ErrorCode::InvalidEmail => "Email address is invalid",
            ErrorCode::InvalidCoordinates => "Coordinates are out of range",

            // Shop
            ErrorCode::ShopNotFound => "Shop not found",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::InvalidPrice => "Price must be greater than zero",
            ErrorCode::MenuItemUnavailable => "Menu item is not available",
            ErrorCode::OfferNotFound => "Offer not found",
            ErrorCode::InvalidDiscount => "Discount percent must be between 0 and 100",
            ErrorCode::InvalidTimestamp => "Timestamp must be RFC 3339",
            ErrorCode::InvalidDateRange => "validUntil must not precede validFrom",
            ErrorCode::OfferNotActive => "Offer is not currently valid",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::DuplicateTokenNumber => "Token number already exists",
            ErrorCode::InvalidStatus => "Unknown order status",
            ErrorCode::InvalidStatusTransition => "Order status transition is not allowed",
            ErrorCode::OrderStatusConflict => "Order status was changed concurrently",
            ErrorCode::InvalidDeliveryMode => "Delivery mode must be Pickup or Delivery",
            ErrorCode::InvalidAmount => "Amount is out of range",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::InvalidQuantity => "Quantity must be a positive integer",
            ErrorCode::EmptyCart => "Cart is empty",

            // Payment
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::DuplicateTransactionId => "Transaction id already exists",
            ErrorCode::InvalidPaymentStatus => "Unknown payment status",
            ErrorCode::ReceiptNotFound => "Receipt not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::DuplicateEmail.code(), 1002);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::DuplicateTransactionId.code(), 5002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_symbol_matches_serde_name() {
        let all = [
            ErrorCode::Success,
            ErrorCode::MissingId,
            ErrorCode::InvalidReference,
            ErrorCode::DuplicateEmail,
            ErrorCode::MenuItemNotFound,
            ErrorCode::InvalidDiscount,
            ErrorCode::DuplicateTokenNumber,
            ErrorCode::InvalidStatusTransition,
            ErrorCode::OrderStatusConflict,
            ErrorCode::DuplicateTransactionId,
            ErrorCode::ReceiptNotFound,
            ErrorCode::DatabaseError,
        ];
        for code in all {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.symbol()));
        }
    }

    #[test]
    fn test_from_symbol() {
        assert_eq!(
            ErrorCode::from_symbol("INVALID_PRICE"),
            Some(ErrorCode::InvalidPrice)
        );
        assert_eq!(
            ErrorCode::from_symbol("DUPLICATE_TOKEN_NUMBER"),
            Some(ErrorCode::DuplicateTokenNumber)
        );
        assert_eq!(ErrorCode::from_symbol("BANANA"), None);
    }

    #[test]
    fn test_display_is_symbolic() {
        assert_eq!(ErrorCode::OrderNotFound.to_string(), "ORDER_NOT_FOUND");
    }
}
