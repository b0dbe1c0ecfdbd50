//! Customer API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use shared::models::{Customer, CustomerCreate, CustomerUpdate};
use shared::request::{IdQuery, Page, search_term};

use crate::core::ServerState;
use crate::db::repository::customer;
use crate::utils::{ApiQuery, AppError, AppResult, ErrorCode, ValidJson};

#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// name / email / phone
    pub search: Option<String>,
}

/// GET /api/customers - 顾客列表，或 `?id=` 获取单个顾客
pub async fn list_or_get(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<CustomerQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let customer = customer::find_by_id(state.pool(), id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;
        return Ok(Json(customer).into_response());
    }

    let page = Page::new(query.limit, query.offset);
    let customers =
        customer::find_all(state.pool(), search_term(query.search.as_deref()), page).await?;
    Ok(Json(customers).into_response())
}

/// POST /api/customers - 注册顾客 (邮箱不区分大小写唯一)
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<CustomerCreate>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let customer = customer::create(state.pool(), payload, shared::util::now_millis()).await?;
    tracing::info!(customer_id = customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /api/customers?id= - 更新顾客
pub async fn update(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ValidJson(payload): ValidJson<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    let id = query.require()?;
    let customer = customer::update(state.pool(), id, payload).await?;
    Ok(Json(customer))
}

/// DELETE /api/customers?id= - 删除顾客 (仍有订单引用时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<Value>> {
    let id = query.require()?;
    let customer = customer::delete(state.pool(), id).await?;
    tracing::info!(customer_id = id, "Customer deleted");
    Ok(Json(shared::response::deleted("customer", "Customer", &customer)))
}
