//! Offer API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use shared::models::{Offer, OfferCreate, OfferUpdate, check_window};
use shared::request::{IdQuery, Page, search_term};

use crate::core::ServerState;
use crate::db::repository::offer::{self, OfferFilter};
use crate::utils::{ApiQuery, AppError, AppResult, ErrorCode, ValidJson};

#[derive(Debug, Default, Deserialize)]
pub struct OfferQuery {
    pub id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    /// `true`: only offers valid right now
    pub active: Option<bool>,
}

/// GET /api/offers - 优惠列表 (`active=true` 只返回当前有效的)，或 `?id=`
pub async fn list_or_get(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<OfferQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let offer = offer::find_by_id(state.pool(), id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OfferNotFound))?;
        return Ok(Json(offer).into_response());
    }

    let filter = OfferFilter {
        search: search_term(query.search.as_deref()).map(str::to_string),
        active_at: query
            .active
            .unwrap_or(false)
            .then(shared::util::now_rfc3339),
    };
    let page = Page::new(query.limit, query.offset);
    let offers = offer::find_all(state.pool(), &filter, page).await?;
    Ok(Json(offers).into_response())
}

/// POST /api/offers - 创建优惠
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<OfferCreate>,
) -> AppResult<(StatusCode, Json<Offer>)> {
    check_window(&payload.valid_from, &payload.valid_until)?;
    let offer = offer::create(state.pool(), payload, shared::util::now_millis()).await?;
    tracing::info!(offer_id = offer.id, discount = offer.discount_percent, "Offer created");
    Ok((StatusCode::CREATED, Json(offer)))
}

/// PUT /api/offers?id= - 更新优惠
///
/// The window is checked against the stored row, so moving only one
/// end still has to keep `validFrom <= validUntil`.
pub async fn update(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ValidJson(payload): ValidJson<OfferUpdate>,
) -> AppResult<Json<Offer>> {
    let id = query.require()?;
    if payload.valid_from.is_some() || payload.valid_until.is_some() {
        let current = offer::find_by_id(state.pool(), id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OfferNotFound))?;
        check_window(
            payload.valid_from.as_deref().unwrap_or(&current.valid_from),
            payload.valid_until.as_deref().unwrap_or(&current.valid_until),
        )?;
    }
    let offer = offer::update(state.pool(), id, payload).await?;
    Ok(Json(offer))
}

/// DELETE /api/offers?id= - 删除优惠
pub async fn delete(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<IdQuery>,
) -> AppResult<Json<Value>> {
    let id = query.require()?;
    let offer = offer::delete(state.pool(), id).await?;
    tracing::info!(offer_id = id, "Offer deleted");
    Ok(Json(shared::response::deleted("offer", "Offer", &offer)))
}
