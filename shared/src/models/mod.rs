//! Data models
//!
//! Shared between food-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY); server timestamps are
//! UTC epoch milliseconds.

/// Upper bound for a unit price
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Upper bound for the quantity on a single line
pub const MAX_QUANTITY: i64 = 9999;

pub mod checkout;
pub mod customer;
pub mod menu_item;
pub mod offer;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod receipt;
pub mod shop;

// Re-exports
pub use checkout::*;
pub use customer::*;
pub use menu_item::*;
pub use offer::*;
pub use order::*;
pub use order_item::*;
pub use payment::*;
pub use receipt::*;
pub use shop::*;
