//! Order Item API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use shared::models::{OrderItem, OrderItemCreate, OrderItemUpdate};
use shared::request::{IdQuery, Page};

use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::db::repository::order_item::{self, NewOrderItem, OrderItemFilter};
use crate::utils::{ApiQuery, AppError, AppResult, ErrorCode, ValidJson};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemQuery {
    pub id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub order_id: Option<i64>,
    pub menu_item_id: Option<i64>,
}

/// GET /api/order-items - 订单明细列表 (按订单 / 菜品过滤)，或 `?id=`
pub async fn list_or_get(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<OrderItemQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let item = order_item::find_by_id(state.pool(), id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OrderItemNotFound))?;
        return Ok(Json(item).into_response());
    }

    let filter = OrderItemFilter {
        order_id: query.order_id,
        menu_item_id: query.menu_item_id,
    };
    let page = Page::new(query.limit, query.offset);
    let items = order_item::find_all(state.pool(), &filter, page).await?;
    Ok(Json(items).into_response())
}

/// POST /api/order-items - 添加订单明细
///
/// Without an explicit `price` the line snapshots the menu item's
/// current price.
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<OrderItemCreate>,
) -> AppResult<(StatusCode, Json<OrderItem>)> {
    let price = match payload.price {
        Some(price) => price,
        None => {
            menu_item::find_by_id(state.pool(), payload.menu_item_id)
                .await?
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::InvalidReference,
                        format!("menu item {} does not exist", payload.menu_item_id),
                    )
                    .with_detail("menuItemId", payload.menu_item_id)
                })?
                .price
        }
    };

    let new_item = NewOrderItem {
        order_id: payload.order_id,
        menu_item_id: payload.menu_item_id,
        quantity: payload.quantity,
        price,
    };
    let item = order_item::create(state.pool(), new_item, shared::util::now_millis()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/order-items?id= - 修改数量 / 单价
pub async fn update(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ValidJson(payload): ValidJson<OrderItemUpdate>,
) -> AppResult<Json<OrderItem>> {
    let id = query.require()?;
    let item = order_item::update(state.pool(), id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/order-items?id= - 删除订单明细
pub async fn delete(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<Value>> {
    let id = query.require()?;
    let item = order_item::delete(state.pool(), id).await?;
    Ok(Json(shared::response::deleted("orderItem", "Order item", &item)))
}
