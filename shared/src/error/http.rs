//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ShopNotFound
            | Self::CustomerNotFound
            | Self::MenuItemNotFound
            | Self::OfferNotFound
            | Self::OrderNotFound
            | Self::OrderItemNotFound
            | Self::PaymentNotFound
            | Self::ReceiptNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::OrderStatusConflict => StatusCode::CONFLICT,

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation, duplicates, business rules)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
