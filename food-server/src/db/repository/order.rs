//! Order Repository
//!
//! Status writes are compare-and-set on the status the caller validated
//! against, so two concurrent transitions cannot both win.

use super::{RepoError, RepoResult, push_page, push_search};
use shared::ErrorCode;
use shared::models::Order;
use shared::order::{DeliveryMode, OrderStatus, PaymentStatus};
use shared::request::Page;
use sqlx::{Executor, QueryBuilder, Sqlite, SqliteConnection};

const COLUMNS: &str = "id, customer_id, token_number, subtotal, discount, final_amount, status, delivery_mode, payment_status, estimated_ready_time, request_id, created_at, updated_at";

/// List filters
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub customer_id: Option<i64>,
    pub delivery_mode: Option<DeliveryMode>,
}

/// Fully resolved row to insert
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: Option<i64>,
    pub token_number: String,
    pub subtotal: f64,
    pub discount: f64,
    pub final_amount: f64,
    pub status: OrderStatus,
    pub delivery_mode: DeliveryMode,
    pub payment_status: PaymentStatus,
    pub estimated_ready_time: Option<String>,
    pub request_id: Option<String>,
}

/// Partial update with enums already parsed; `None` keeps the column
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub customer_id: Option<i64>,
    pub token_number: Option<String>,
    pub subtotal: Option<f64>,
    pub discount: Option<f64>,
    pub final_amount: Option<f64>,
    pub status: Option<OrderStatus>,
    pub delivery_mode: Option<DeliveryMode>,
    pub payment_status: Option<PaymentStatus>,
    pub estimated_ready_time: Option<String>,
}

/// Newest first; ties broken by id so pages are stable
pub async fn find_all<'e, E>(db: E, filter: &OrderFilter, page: Page) -> RepoResult<Vec<Order>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM orders WHERE 1 = 1"));
    if let Some(term) = filter.search.as_deref() {
        push_search(&mut qb, &["token_number"], term);
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(payment_status) = filter.payment_status {
        qb.push(" AND payment_status = ").push_bind(payment_status);
    }
    if let Some(customer_id) = filter.customer_id {
        qb.push(" AND customer_id = ").push_bind(customer_id);
    }
    if let Some(delivery_mode) = filter.delivery_mode {
        qb.push(" AND delivery_mode = ").push_bind(delivery_mode);
    }
    qb.push(" ORDER BY created_at DESC, id DESC");
    push_page(&mut qb, page);
    Ok(qb.build_query_as::<Order>().fetch_all(db).await?)
}

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Order>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(order)
}

pub async fn find_by_token<'e, E>(db: E, token_number: &str) -> RepoResult<Option<Order>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE token_number = ?"
    ))
    .bind(token_number)
    .fetch_optional(db)
    .await?;
    Ok(order)
}

/// Order written by an earlier checkout with this idempotency key
pub async fn find_by_request_id<'e, E>(db: E, request_id: &str) -> RepoResult<Option<Order>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE request_id = ?"
    ))
    .bind(request_id)
    .fetch_optional(db)
    .await?;
    Ok(order)
}

pub async fn create<'e, E>(db: E, data: NewOrder, now: i64) -> RepoResult<Order>
where
    E: Executor<'e, Database = Sqlite>,
{
    let order = sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO orders (customer_id, token_number, subtotal, discount, final_amount, status, delivery_mode, payment_status, estimated_ready_time, request_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11) RETURNING {COLUMNS}"
    ))
    .bind(data.customer_id)
    .bind(data.token_number)
    .bind(data.subtotal)
    .bind(data.discount)
    .bind(data.final_amount)
    .bind(data.status)
    .bind(data.delivery_mode)
    .bind(data.payment_status)
    .bind(data.estimated_ready_time)
    .bind(data.request_id)
    .bind(now)
    .fetch_one(db)
    .await?;
    Ok(order)
}

/// Apply `changes` if the order is still in `expected` status.
///
/// - row gone -> `NotFound`
/// - status moved since the caller read it -> `Conflict(ORDER_STATUS_CONFLICT)`
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    changes: OrderChanges,
    expected: OrderStatus,
    now: i64,
) -> RepoResult<Order> {
    let updated = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET customer_id = COALESCE(?1, customer_id), token_number = COALESCE(?2, token_number), subtotal = COALESCE(?3, subtotal), discount = COALESCE(?4, discount), final_amount = COALESCE(?5, final_amount), status = COALESCE(?6, status), delivery_mode = COALESCE(?7, delivery_mode), payment_status = COALESCE(?8, payment_status), estimated_ready_time = COALESCE(?9, estimated_ready_time), updated_at = ?10 WHERE id = ?11 AND status = ?12 RETURNING {COLUMNS}"
    ))
    .bind(changes.customer_id)
    .bind(changes.token_number)
    .bind(changes.subtotal)
    .bind(changes.discount)
    .bind(changes.final_amount)
    .bind(changes.status)
    .bind(changes.delivery_mode)
    .bind(changes.payment_status)
    .bind(changes.estimated_ready_time)
    .bind(now)
    .bind(id)
    .bind(expected)
    .fetch_optional(&mut *conn)
    .await?;

    match updated {
        Some(order) => Ok(order),
        None => match find_by_id(&mut *conn, id).await? {
            None => Err(RepoError::NotFound(ErrorCode::OrderNotFound)),
            Some(current) => Err(RepoError::Conflict(
                ErrorCode::OrderStatusConflict,
                format!(
                    "order {id} changed from '{expected}' to '{}' concurrently",
                    current.status
                ),
            )),
        },
    }
}

pub async fn delete<'e, E>(db: E, id: i64) -> RepoResult<Order>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Order>(&format!("DELETE FROM orders WHERE id = ? RETURNING {COLUMNS}"))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| RepoError::from(e).on_delete(&format!("Order {id}")))?
        .ok_or(RepoError::NotFound(ErrorCode::OrderNotFound))
}

#[cfg(test)]
pub(crate) fn sample(token: &str) -> NewOrder {
    NewOrder {
        customer_id: None,
        token_number: token.into(),
        subtotal: 100.0,
        discount: 0.0,
        final_amount: 100.0,
        status: OrderStatus::OrderReceived,
        delivery_mode: DeliveryMode::Pickup,
        payment_status: PaymentStatus::Pending,
        estimated_ready_time: None,
        request_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing;

    #[tokio::test]
    async fn test_status_stored_as_text() {
        let pool = testing::pool().await;
        let order = create(&pool, sample("TKN1"), 1).await.unwrap();
        assert_eq!(order.status, OrderStatus::OrderReceived);

        let raw: String = sqlx::query_scalar("SELECT status FROM orders WHERE id = ?")
            .bind(order.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(raw, "Order Received");
    }

    #[tokio::test]
    async fn test_duplicate_token() {
        let pool = testing::pool().await;
        create(&pool, sample("TKN1"), 1).await.unwrap();
        let err = create(&pool, sample("TKN1"), 2).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Duplicate { code: ErrorCode::DuplicateTokenNumber, .. }
        ));
    }

    #[tokio::test]
    async fn test_compare_and_set() {
        let pool = testing::pool().await;
        let order = create(&pool, sample("TKN1"), 1).await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let confirmed = update(
            &mut conn,
            order.id,
            OrderChanges {
                status: Some(OrderStatus::Confirmed),
                ..Default::default()
            },
            OrderStatus::OrderReceived,
            5,
        )
        .await
        .unwrap();
        assert_eq!(confirmed.status, OrderStatus::Confirmed);
        assert_eq!(confirmed.updated_at, 5);
        assert_eq!(confirmed.created_at, 1);

        // A second writer that also saw "Order Received" loses
        let err = update(
            &mut conn,
            order.id,
            OrderChanges {
                status: Some(OrderStatus::Cancelled),
                ..Default::default()
            },
            OrderStatus::OrderReceived,
            6,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Conflict(ErrorCode::OrderStatusConflict, _)
        ));

        let err = update(&mut conn, 999, OrderChanges::default(), OrderStatus::OrderReceived, 7)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(ErrorCode::OrderNotFound)));
    }

    #[tokio::test]
    async fn test_list_newest_first_with_filters() {
        let pool = testing::pool().await;
        create(&pool, sample("TKN-A"), 10).await.unwrap();
        create(&pool, sample("TKN-B"), 30).await.unwrap();
        let mut delivery = sample("TKN-C");
        delivery.delivery_mode = DeliveryMode::Delivery;
        create(&pool, delivery, 20).await.unwrap();

        let all = find_all(&pool, &OrderFilter::default(), Page::default()).await.unwrap();
        let tokens: Vec<_> = all.iter().map(|o| o.token_number.as_str()).collect();
        assert_eq!(tokens, vec!["TKN-B", "TKN-C", "TKN-A"]);

        let filter = OrderFilter {
            delivery_mode: Some(DeliveryMode::Delivery),
            ..Default::default()
        };
        let only = find_all(&pool, &filter, Page::default()).await.unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].token_number, "TKN-C");

        let filter = OrderFilter {
            search: Some("-A".into()),
            ..Default::default()
        };
        assert_eq!(find_all(&pool, &filter, Page::default()).await.unwrap().len(), 1);
    }
}
