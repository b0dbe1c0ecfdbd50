//! Checkout API 模块
//!
//! `POST /api/checkout`: order + lines + payment + receipt in one transaction.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/checkout", post(handler::checkout))
}
