//! Order status state machine
//!
//! ```text
//! Order Received -> Confirmed -> Preparing -> Ready -> Completed
//!        \______________\___________\__________\_____-> Cancelled
//! ```
//!
//! `Completed` and `Cancelled` are terminal. Re-applying the current status
//! is a no-op and always allowed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::types::ParseEnumError;
use crate::error::ErrorCode;

/// 订单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum OrderStatus {
    /// 已下单 (initial state)
    #[default]
    #[serde(rename = "Order Received")]
    #[cfg_attr(feature = "db", sqlx(rename = "Order Received"))]
    OrderReceived,
    /// 已确认
    Confirmed,
    /// 制作中
    Preparing,
    /// 待取餐
    Ready,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::OrderReceived,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::OrderReceived => "Order Received",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// The forward step a kitchen "advance" action takes, if any
    pub const fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::OrderReceived => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }

    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        if *self == target {
            return true;
        }
        match target {
            OrderStatus::Cancelled => !self.is_terminal(),
            _ => self.next() == Some(target),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseEnumError::new(ErrorCode::InvalidStatus, "status", s))
    }
}
