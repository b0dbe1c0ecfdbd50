//! Order lifecycle types
//!
//! - [`OrderStatus`]: the status state machine
//! - [`DeliveryMode`], [`PaymentStatus`]: typed wire enums

pub mod status;
pub mod types;

// Re-exports
pub use status::OrderStatus;
pub use types::{DeliveryMode, ParseEnumError, PaymentStatus};
