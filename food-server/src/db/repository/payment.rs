//! Payment Repository

use super::{RepoError, RepoResult, push_page, push_search};
use shared::ErrorCode;
use shared::models::Payment;
use shared::order::PaymentStatus;
use shared::request::Page;
use sqlx::{Executor, QueryBuilder, Sqlite};

const COLUMNS: &str =
    "id, order_id, transaction_id, payment_mode, amount_paid, payment_status, created_at";

/// List filters
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub search: Option<String>,
    pub order_id: Option<i64>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_mode: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub order_id: i64,
    pub transaction_id: String,
    pub payment_mode: String,
    pub amount_paid: f64,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentChanges {
    pub transaction_id: Option<String>,
    pub payment_mode: Option<String>,
    pub amount_paid: Option<f64>,
    pub payment_status: Option<PaymentStatus>,
}

pub async fn find_all<'e, E>(db: E, filter: &PaymentFilter, page: Page) -> RepoResult<Vec<Payment>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM payment WHERE 1 = 1"));
    if let Some(term) = filter.search.as_deref() {
        push_search(&mut qb, &["transaction_id"], term);
    }
    if let Some(order_id) = filter.order_id {
        qb.push(" AND order_id = ").push_bind(order_id);
    }
    if let Some(status) = filter.payment_status {
        qb.push(" AND payment_status = ").push_bind(status);
    }
    if let Some(mode) = &filter.payment_mode {
        qb.push(" AND payment_mode = ").push_bind(mode.clone());
    }
    qb.push(" ORDER BY id ASC");
    push_page(&mut qb, page);
    Ok(qb.build_query_as::<Payment>().fetch_all(db).await?)
}

pub async fn find_by_order<'e, E>(db: E, order_id: i64) -> RepoResult<Vec<Payment>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let payments = sqlx::query_as::<_, Payment>(&format!(
        "SELECT {COLUMNS} FROM payment WHERE order_id = ? ORDER BY id ASC"
    ))
    .bind(order_id)
    .fetch_all(db)
    .await?;
    Ok(payments)
}

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Payment>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let payment =
        sqlx::query_as::<_, Payment>(&format!("SELECT {COLUMNS} FROM payment WHERE id = ?"))
            .bind(id)
            .fetch_optional(db)
            .await?;
    Ok(payment)
}

pub async fn create<'e, E>(db: E, data: NewPayment, now: i64) -> RepoResult<Payment>
where
    E: Executor<'e, Database = Sqlite>,
{
    let payment = sqlx::query_as::<_, Payment>(&format!(
        "INSERT INTO payment (order_id, transaction_id, payment_mode, amount_paid, payment_status, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(data.order_id)
    .bind(data.transaction_id)
    .bind(data.payment_mode)
    .bind(data.amount_paid)
    .bind(data.payment_status)
    .bind(now)
    .fetch_one(db)
    .await?;
    Ok(payment)
}

pub async fn update<'e, E>(db: E, id: i64, data: PaymentChanges) -> RepoResult<Payment>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Payment>(&format!(
        "UPDATE payment SET transaction_id = COALESCE(?1, transaction_id), payment_mode = COALESCE(?2, payment_mode), amount_paid = COALESCE(?3, amount_paid), payment_status = COALESCE(?4, payment_status) WHERE id = ?5 RETURNING {COLUMNS}"
    ))
    .bind(data.transaction_id)
    .bind(data.payment_mode)
    .bind(data.amount_paid)
    .bind(data.payment_status)
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(RepoError::NotFound(ErrorCode::PaymentNotFound))
}

pub async fn delete<'e, E>(db: E, id: i64) -> RepoResult<Payment>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Payment>(&format!("DELETE FROM payment WHERE id = ? RETURNING {COLUMNS}"))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(RepoError::NotFound(ErrorCode::PaymentNotFound))
}
