//! Shop API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use shared::models::{Shop, ShopCreate, ShopUpdate};
use shared::request::{IdQuery, Page, search_term};

use crate::core::ServerState;
use crate::db::repository::shop;
use crate::utils::{ApiQuery, AppError, AppResult, ErrorCode, ValidJson};

#[derive(Debug, Default, Deserialize)]
pub struct ShopQuery {
    pub id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/shops - 门店列表，或 `?id=` 获取单个门店
pub async fn list_or_get(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<ShopQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let shop = shop::find_by_id(state.pool(), id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ShopNotFound))?;
        return Ok(Json(shop).into_response());
    }

    let page = Page::new(query.limit, query.offset);
    let shops = shop::find_all(state.pool(), search_term(query.search.as_deref()), page).await?;
    Ok(Json(shops).into_response())
}

/// POST /api/shops - 创建门店
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<ShopCreate>,
) -> AppResult<(StatusCode, Json<Shop>)> {
    let shop = shop::create(state.pool(), payload, shared::util::now_millis()).await?;
    tracing::info!(shop_id = shop.id, name = %shop.name, "Shop created");
    Ok((StatusCode::CREATED, Json(shop)))
}

/// PUT /api/shops?id= - 更新门店
pub async fn update(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ValidJson(payload): ValidJson<ShopUpdate>,
) -> AppResult<Json<Shop>> {
    let id = query.require()?;
    let shop = shop::update(state.pool(), id, payload).await?;
    Ok(Json(shop))
}

/// DELETE /api/shops?id= - 删除门店
pub async fn delete(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<Value>> {
    let id = query.require()?;
    let shop = shop::delete(state.pool(), id).await?;
    tracing::info!(shop_id = id, "Shop deleted");
    Ok(Json(shared::response::deleted("shop", "Shop", &shop)))
}
