//! Unified error system for the food ordering service
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized, symbolic error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorBody`]: The `{error, code}` body every endpoint returns on failure
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Customer errors
//! - 2xxx: Shop errors
//! - 3xxx: Menu / offer errors
//! - 4xxx: Order errors
//! - 5xxx: Payment / receipt errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::OrderNotFound);
//! let err = AppError::with_message(ErrorCode::InvalidEmail, "email is malformed")
//!     .with_detail("field", "email");
//!
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, Some(ErrorCode::InvalidEmail));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{AppError, AppResult, ErrorBody};
