//! Offer API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/offers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route(
        "/",
        get(handler::list_or_get)
            .post(handler::create)
            .put(handler::update)
            .delete(handler::delete),
    )
}
