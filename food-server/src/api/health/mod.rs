//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 存活探针 |
//!
//! ```json
//! { "status": "healthy", "version": "0.1.0" }
//! ```

use axum::{Json, Router, routing::get};
use shared::response::HealthResponse;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// GET /health - 存活检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
