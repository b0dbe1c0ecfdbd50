//! Order API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | GET/POST/PUT/DELETE | 订单 CRUD (`?id=`) |
//! | /api/orders/advance | POST | 推进到下一状态 |
//! | /api/orders/cancel | POST | 取消订单 |
//! | /api/orders/detail | GET | 订单 + 明细 + 支付 + 小票 |
//! | /api/orders/token | GET | 按取餐号查询 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list_or_get)
                .post(handler::create)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/advance", post(handler::advance))
        .route("/cancel", post(handler::cancel))
        .route("/detail", get(handler::detail))
        .route("/token", get(handler::by_token))
}
