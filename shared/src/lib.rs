//! Shared types for the food ordering service
//!
//! Wire models, request/response helpers, the order lifecycle and the
//! unified error system used by `food-server` and its clients.

pub mod error;
pub mod models;
pub mod order;
pub mod request;
pub mod response;
pub mod util;
pub mod validation;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
pub use order::{DeliveryMode, OrderStatus, PaymentStatus};
pub use validation::Normalize;
