//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`extract`] - 把 axum 拒绝转换为 `AppError` 的提取器
//! - 日志初始化、载荷校验

pub mod error;
pub mod extract;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use extract::{ApiQuery, ValidJson};
