//! Error types and the wire error body

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the service, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (offending field, resource, ...)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<BTreeMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a missing `id` error
    pub fn missing_id() -> Self {
        Self::new(ErrorCode::MissingId)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Error body returned by every endpoint on failure
///
/// ```json
/// { "error": "Order not found", "code": "ORDER_NOT_FOUND" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Symbolic error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.message.clone(),
            code: Some(err.code),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Validation Integration =====

impl From<validator::ValidationErrors> for AppError {
    /// Report the first failing field (fields sorted by name, so the choice
    /// is stable). Rule codes that name an [`ErrorCode`] are carried through.
    fn from(errors: validator::ValidationErrors) -> Self {
        let Some((field, first)) = first_error(&errors) else {
            return AppError::validation("Validation failed");
        };

        let code = ErrorCode::from_symbol(&first.code).unwrap_or(ErrorCode::ValidationFailed);
        let message = match (code, first.message.as_ref()) {
            (ErrorCode::MissingField, _) => format!("{field} is required"),
            (_, Some(m)) => m.to_string(),
            (_, None) => format!("{field} is invalid"),
        };

        AppError::with_message(code, message).with_detail("field", field)
    }
}

/// Depth-first search for the first leaf error, returning its wire path
/// (`items[0].quantity`).
fn first_error(errors: &validator::ValidationErrors) -> Option<(String, validator::ValidationError)> {
    use validator::ValidationErrorsKind;

    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in entries {
        let field = camel_case(field);
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(first) = list.first() {
                    return Some((field, first.clone()));
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                if let Some((path, err)) = first_error(inner) {
                    return Some((format!("{field}.{path}"), err));
                }
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    if let Some((path, err)) = first_error(inner) {
                        return Some((format!("{field}[{index}].{path}"), err));
                    }
                }
            }
        }
    }
    None
}

/// snake_case field name -> camelCase wire name
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // System errors: log the cause, never echo it to the client
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
            let body = ErrorBody {
                error: self.code.message().to_string(),
                code: Some(self.code),
                details: None,
            };
            return (status, Json(body)).into_response();
        }

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}
