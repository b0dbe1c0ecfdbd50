//! Payment API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use shared::models::{Payment, PaymentCreate, PaymentUpdate};
use shared::order::PaymentStatus;
use shared::request::{IdQuery, Page, search_term};

use crate::core::ServerState;
use crate::db::repository::payment::{self, NewPayment, PaymentChanges, PaymentFilter};
use crate::utils::{ApiQuery, AppError, AppResult, ErrorCode, ValidJson};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuery {
    pub id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// transaction id substring
    pub search: Option<String>,
    pub order_id: Option<i64>,
    pub payment_status: Option<String>,
    pub payment_mode: Option<String>,
}

/// GET /api/payments - 支付记录列表，或 `?id=`
pub async fn list_or_get(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<PaymentQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let payment = payment::find_by_id(state.pool(), id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))?;
        return Ok(Json(payment).into_response());
    }

    let filter = PaymentFilter {
        search: search_term(query.search.as_deref()).map(str::to_string),
        order_id: query.order_id,
        payment_status: query
            .payment_status
            .as_deref()
            .map(str::parse::<PaymentStatus>)
            .transpose()?,
        payment_mode: query.payment_mode,
    };
    let page = Page::new(query.limit, query.offset);
    let payments = payment::find_all(state.pool(), &filter, page).await?;
    Ok(Json(payments).into_response())
}

/// POST /api/payments - 记录支付 (默认 Pending)
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<PaymentCreate>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    let payment_status = payload
        .payment_status
        .as_deref()
        .map(str::parse::<PaymentStatus>)
        .transpose()?
        .unwrap_or_default();

    let new_payment = NewPayment {
        order_id: payload.order_id,
        transaction_id: payload.transaction_id,
        payment_mode: payload.payment_mode,
        amount_paid: payload.amount_paid,
        payment_status,
    };
    let payment = payment::create(state.pool(), new_payment, shared::util::now_millis()).await?;
    tracing::info!(
        payment_id = payment.id,
        order_id = payment.order_id,
        transaction_id = %payment.transaction_id,
        amount = payment.amount_paid,
        "Payment recorded"
    );
    Ok((StatusCode::CREATED, Json(payment)))
}

/// PUT /api/payments?id= - 更新支付记录
pub async fn update(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ValidJson(payload): ValidJson<PaymentUpdate>,
) -> AppResult<Json<Payment>> {
    let id = query.require()?;
    let changes = PaymentChanges {
        transaction_id: payload.transaction_id,
        payment_mode: payload.payment_mode,
        amount_paid: payload.amount_paid,
        payment_status: payload
            .payment_status
            .as_deref()
            .map(str::parse::<PaymentStatus>)
            .transpose()?,
    };
    let payment = payment::update(state.pool(), id, changes).await?;
    Ok(Json(payment))
}

/// DELETE /api/payments?id= - 删除支付记录
pub async fn delete(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<Value>> {
    let id = query.require()?;
    let payment = payment::delete(state.pool(), id).await?;
    tracing::info!(payment_id = id, "Payment deleted");
    Ok(Json(shared::response::deleted("payment", "Payment", &payment)))
}
