//! Request extractors
//!
//! Thin wrappers over axum's `Json` / `Query` whose rejections are
//! [`AppError`]s, so malformed input gets the same error body as
//! everything else.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use shared::Normalize;
use validator::Validate;

use super::error::{from_json_rejection, from_query_rejection};
use super::validation::validate_payload;
use super::AppError;

/// JSON body, normalized then validated
///
/// ```ignore
/// async fn create(ValidJson(payload): ValidJson<ShopCreate>) -> AppResult<...>
/// ```
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Normalize + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(from_json_rejection)?;
        Ok(Self(validate_payload(payload)?))
    }
}

/// Query string
#[derive(Debug, Clone, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(from_query_rejection)?;
        Ok(Self(query))
    }
}
