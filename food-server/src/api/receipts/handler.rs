//! Receipt API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use shared::models::{Receipt, ReceiptCreate, ReceiptUpdate};
use shared::request::{IdQuery, Page, search_term};

use crate::core::ServerState;
use crate::db::repository::receipt::{self, ReceiptFilter};
use crate::utils::{ApiQuery, AppError, AppResult, ErrorCode, ValidJson};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptQuery {
    pub id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    pub order_id: Option<i64>,
}

/// GET /api/receipts - 小票列表，或 `?id=`
pub async fn list_or_get(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<ReceiptQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let receipt = receipt::find_by_id(state.pool(), id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ReceiptNotFound))?;
        return Ok(Json(receipt).into_response());
    }

    let filter = ReceiptFilter {
        search: search_term(query.search.as_deref()).map(str::to_string),
        order_id: query.order_id,
    };
    let page = Page::new(query.limit, query.offset);
    let receipts = receipt::find_all(state.pool(), &filter, page).await?;
    Ok(Json(receipts).into_response())
}

/// POST /api/receipts - 创建小票
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<ReceiptCreate>,
) -> AppResult<(StatusCode, Json<Receipt>)> {
    let receipt = receipt::create(
        state.pool(),
        payload.order_id,
        payload.receipt_data,
        shared::util::now_millis(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// PUT /api/receipts?id= - 更新小票内容
pub async fn update(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ValidJson(payload): ValidJson<ReceiptUpdate>,
) -> AppResult<Json<Receipt>> {
    let id = query.require()?;
    let receipt = receipt::update(state.pool(), id, payload).await?;
    Ok(Json(receipt))
}

/// DELETE /api/receipts?id= - 删除小票
pub async fn delete(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<Value>> {
    let id = query.require()?;
    let receipt = receipt::delete(state.pool(), id).await?;
    Ok(Json(shared::response::deleted("receipt", "Receipt", &receipt)))
}
