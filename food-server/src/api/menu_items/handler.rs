//! Menu Item API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::request::{IdQuery, Page, search_term};

use crate::core::ServerState;
use crate::db::repository::menu_item::{self, MenuItemFilter};
use crate::utils::{ApiQuery, AppError, AppResult, ErrorCode, ValidJson};

#[derive(Debug, Default, Deserialize)]
pub struct MenuItemQuery {
    pub id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

/// GET /api/menu-items - 菜单列表 (可按分类、是否可售过滤)，或 `?id=`
pub async fn list_or_get(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<MenuItemQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let item = menu_item::find_by_id(state.pool(), id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;
        return Ok(Json(item).into_response());
    }

    let filter = MenuItemFilter {
        search: search_term(query.search.as_deref()).map(str::to_string),
        category: query.category,
        available: query.available,
    };
    let page = Page::new(query.limit, query.offset);
    let items = menu_item::find_all(state.pool(), &filter, page).await?;
    Ok(Json(items).into_response())
}

/// POST /api/menu-items - 创建菜品 (默认可售)
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    let item = menu_item::create(state.pool(), payload, shared::util::now_millis()).await?;
    tracing::info!(menu_item_id = item.id, name = %item.name, price = item.price, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/menu-items?id= - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ValidJson(payload): ValidJson<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let id = query.require()?;
    let item = menu_item::update(state.pool(), id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items?id= - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<Value>> {
    let id = query.require()?;
    let item = menu_item::delete(state.pool(), id).await?;
    tracing::info!(menu_item_id = id, "Menu item deleted");
    Ok(Json(shared::response::deleted("menuItem", "Menu item", &item)))
}
