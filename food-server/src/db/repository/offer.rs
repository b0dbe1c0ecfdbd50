//! Offer Repository
//!
//! Window bounds are canonical UTC RFC 3339 text, so `<=` on the columns is a
//! time comparison.

use super::{RepoError, RepoResult, push_page, push_search};
use shared::ErrorCode;
use shared::models::{Offer, OfferCreate, OfferUpdate};
use shared::request::Page;
use sqlx::{Executor, QueryBuilder, Sqlite};

const COLUMNS: &str = "id, title, discount_percent, valid_from, valid_until, created_at";

/// List filters
#[derive(Debug, Clone, Default)]
pub struct OfferFilter {
    pub search: Option<String>,
    /// Only offers whose window contains this instant
    pub active_at: Option<String>,
}

pub async fn find_all<'e, E>(db: E, filter: &OfferFilter, page: Page) -> RepoResult<Vec<Offer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM offer WHERE 1 = 1"));
    if let Some(term) = filter.search.as_deref() {
        push_search(&mut qb, &["title"], term);
    }
    if let Some(now) = &filter.active_at {
        qb.push(" AND valid_from <= ")
            .push_bind(now.clone())
            .push(" AND valid_until >= ")
            .push_bind(now.clone());
    }
    qb.push(" ORDER BY id ASC");
    push_page(&mut qb, page);
    Ok(qb.build_query_as::<Offer>().fetch_all(db).await?)
}

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Offer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let offer = sqlx::query_as::<_, Offer>(&format!("SELECT {COLUMNS} FROM offer WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(offer)
}

pub async fn create<'e, E>(db: E, data: OfferCreate, now: i64) -> RepoResult<Offer>
where
    E: Executor<'e, Database = Sqlite>,
{
    let offer = sqlx::query_as::<_, Offer>(&format!(
        "INSERT INTO offer (title, discount_percent, valid_from, valid_until, created_at) VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(data.title)
    .bind(data.discount_percent)
    .bind(data.valid_from)
    .bind(data.valid_until)
    .bind(now)
    .fetch_one(db)
    .await?;
    Ok(offer)
}

/// Caller checks the merged window (`check_window`) before writing
pub async fn update<'e, E>(db: E, id: i64, data: OfferUpdate) -> RepoResult<Offer>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Offer>(&format!(
        "UPDATE offer SET title = COALESCE(?1, title), discount_percent = COALESCE(?2, discount_percent), valid_from = COALESCE(?3, valid_from), valid_until = COALESCE(?4, valid_until) WHERE id = ?5 RETURNING {COLUMNS}"
    ))
    .bind(data.title)
    .bind(data.discount_percent)
    .bind(data.valid_from)
    .bind(data.valid_until)
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(RepoError::NotFound(ErrorCode::OfferNotFound))
}

pub async fn delete<'e, E>(db: E, id: i64) -> RepoResult<Offer>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Offer>(&format!("DELETE FROM offer WHERE id = ? RETURNING {COLUMNS}"))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(RepoError::NotFound(ErrorCode::OfferNotFound))
}
