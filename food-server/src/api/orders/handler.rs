//! Order API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use shared::models::{Order, OrderCreate, OrderDetail, OrderUpdate};
use shared::order::{DeliveryMode, OrderStatus, PaymentStatus};
use shared::request::{IdQuery, Page, search_term};

use crate::core::ServerState;
use crate::db::repository::order::{self, NewOrder, OrderFilter};
use crate::services::order_lifecycle;
use crate::utils::{ApiQuery, AppError, AppResult, ErrorCode, ValidJson};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// token number substring
    pub search: Option<String>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub customer_id: Option<i64>,
    pub delivery_mode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenQuery {
    pub token_number: Option<String>,
}

fn not_found() -> AppError {
    AppError::new(ErrorCode::OrderNotFound)
}

/// GET /api/orders - 订单列表 (新单在前)，或 `?id=` 获取单个订单
pub async fn list_or_get(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<OrderQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let order = order::find_by_id(state.pool(), id)
            .await?
            .ok_or_else(not_found)?;
        return Ok(Json(order).into_response());
    }

    let filter = OrderFilter {
        search: search_term(query.search.as_deref()).map(str::to_string),
        status: query.status.as_deref().map(str::parse::<OrderStatus>).transpose()?,
        payment_status: query
            .payment_status
            .as_deref()
            .map(str::parse::<PaymentStatus>)
            .transpose()?,
        customer_id: query.customer_id,
        delivery_mode: query
            .delivery_mode
            .as_deref()
            .map(str::parse::<DeliveryMode>)
            .transpose()?,
    };
    let page = Page::new(query.limit, query.offset);
    let orders = order::find_all(state.pool(), &filter, page).await?;
    Ok(Json(orders).into_response())
}

/// POST /api/orders - 直接创建订单 (默认状态 Order Received / Pending)
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let status = payload.status.as_deref().map(str::parse::<OrderStatus>).transpose()?;
    let delivery_mode: DeliveryMode = payload.delivery_mode.parse()?;
    let payment_status = payload
        .payment_status
        .as_deref()
        .map(str::parse::<PaymentStatus>)
        .transpose()?;

    let new_order = NewOrder {
        customer_id: payload.customer_id,
        token_number: payload.token_number,
        subtotal: payload.subtotal,
        discount: payload.discount.unwrap_or(0.0),
        final_amount: payload.final_amount,
        status: status.unwrap_or_default(),
        delivery_mode,
        payment_status: payment_status.unwrap_or_default(),
        estimated_ready_time: payload.estimated_ready_time,
        request_id: None,
    };
    let order = order::create(state.pool(), new_order, shared::util::now_millis()).await?;
    tracing::info!(order_id = order.id, token = %order.token_number, "Order created");
    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /api/orders?id= - 更新订单 (状态变更走状态机校验)
pub async fn update(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ValidJson(payload): ValidJson<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let id = query.require()?;
    let changes = order_lifecycle::parse_changes(payload)?;
    let order = order_lifecycle::update(state.pool(), id, changes).await?;
    Ok(Json(order))
}

/// DELETE /api/orders?id= - 删除订单
pub async fn delete(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<Value>> {
    let id = query.require()?;
    let order = order::delete(state.pool(), id).await?;
    tracing::info!(order_id = id, token = %order.token_number, "Order deleted");
    Ok(Json(shared::response::deleted("order", "Order", &order)))
}

/// POST /api/orders/advance?id= - 推进一步 (厨房 / 前台按钮)
pub async fn advance(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<Order>> {
    let id = query.require()?;
    let order = order_lifecycle::advance(state.pool(), id).await?;
    Ok(Json(order))
}

/// POST /api/orders/cancel?id= - 取消订单
pub async fn cancel(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<Order>> {
    let id = query.require()?;
    let order = order_lifecycle::cancel(state.pool(), id).await?;
    Ok(Json(order))
}

/// GET /api/orders/detail?id= - 订单详情
pub async fn detail(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<OrderDetail>> {
    let id = query.require()?;
    let order = order::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(not_found)?;
    let detail = order_lifecycle::detail(state.pool(), order).await?;
    Ok(Json(detail))
}

/// GET /api/orders/token?tokenNumber= - 顾客按取餐号查询订单状态
pub async fn by_token(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<TokenQuery>,
) -> AppResult<Json<Order>> {
    let token = search_term(query.token_number.as_deref()).ok_or_else(|| {
        AppError::with_message(ErrorCode::MissingField, "tokenNumber is required")
            .with_detail("field", "tokenNumber")
    })?;
    let order = order::find_by_token(state.pool(), token)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(order))
}
