//! API 路由模块
//!
//! Every resource lives at `/api/<resource>` and takes `?id=` for
//! single-record operations.
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`shops`] - 门店
//! - [`customers`] - 顾客
//! - [`menu_items`] - 菜单
//! - [`offers`] - 优惠活动
//! - [`orders`] - 订单 (含状态流转、详情、取餐号查询)
//! - [`order_items`] - 订单明细
//! - [`payments`] - 支付记录
//! - [`receipts`] - 小票
//! - [`checkout`] - 一次性下单结账

pub mod middleware;

pub mod checkout;
pub mod customers;
pub mod health;
pub mod menu_items;
pub mod offers;
pub mod order_items;
pub mod orders;
pub mod payments;
pub mod receipts;
pub mod shops;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::core::ServerState;
use crate::utils::{AppError, ErrorCode};

// Re-export common types for handlers
pub use crate::utils::{ApiQuery, AppResult, ValidJson};

/// Assemble all routes, middleware and state into the service router
pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(shops::router())
        .merge(customers::router())
        .merge(menu_items::router())
        .merge(offers::router())
        .merge(orders::router())
        .merge(order_items::router())
        .merge(payments::router())
        .merge(receipts::router())
        .merge(checkout::router())
        .fallback(route_not_found)
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::with_message(ErrorCode::NotFound, "Route not found")
}
