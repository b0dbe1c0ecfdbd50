//! Checkout API Handler

use axum::{Json, extract::State, http::StatusCode};

use shared::models::{CheckoutRequest, CheckoutResult};

use crate::core::ServerState;
use crate::services::checkout as checkout_service;
use crate::utils::{AppResult, ValidJson};

/// POST /api/checkout - 结账
///
/// 201 for a new checkout, 200 when `requestId` was already processed.
pub async fn checkout(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<CheckoutResult>)> {
    let result = checkout_service::checkout(state.pool(), payload).await?;
    let status = if result.replayed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(result)))
}
