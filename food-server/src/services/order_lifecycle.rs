//! Order lifecycle
//!
//! Every status write goes through [`OrderStatus::can_transition_to`] and is
//! persisted with a compare-and-set on the status it was validated against.

use sqlx::SqlitePool;

use shared::models::{Order, OrderDetail, OrderUpdate};
use shared::order::{DeliveryMode, OrderStatus, PaymentStatus};
use shared::{AppError, AppResult, ErrorCode};

use crate::db::repository::order::{self, OrderChanges};
use crate::db::repository::{RepoError, order_item, payment, receipt};

/// Reject `from -> to` unless the state machine allows it
pub fn ensure_transition(from: OrderStatus, to: OrderStatus) -> AppResult<()> {
    if from.can_transition_to(to) {
        return Ok(());
    }
    Err(AppError::with_message(
        ErrorCode::InvalidStatusTransition,
        format!("cannot change order status from '{from}' to '{to}'"),
    )
    .with_detail("from", from.as_str())
    .with_detail("to", to.as_str()))
}

/// Parse the string enums of a validated update payload
pub fn parse_changes(payload: OrderUpdate) -> AppResult<OrderChanges> {
    Ok(OrderChanges {
        customer_id: payload.customer_id,
        token_number: payload.token_number,
        subtotal: payload.subtotal,
        discount: payload.discount,
        final_amount: payload.final_amount,
        status: payload.status.as_deref().map(str::parse::<OrderStatus>).transpose()?,
        delivery_mode: payload
            .delivery_mode
            .as_deref()
            .map(str::parse::<DeliveryMode>)
            .transpose()?,
        payment_status: payload
            .payment_status
            .as_deref()
            .map(str::parse::<PaymentStatus>)
            .transpose()?,
        estimated_ready_time: payload.estimated_ready_time,
    })
}

/// Partial update; a `status` change must be a legal transition
pub async fn update(pool: &SqlitePool, id: i64, changes: OrderChanges) -> AppResult<Order> {
    let mut conn = pool.acquire().await.map_err(RepoError::from)?;

    let current = order::find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if let Some(target) = changes.status {
        ensure_transition(current.status, target)?;
    }

    let updated = order::update(
        &mut conn,
        id,
        changes,
        current.status,
        shared::util::now_millis(),
    )
    .await?;

    if updated.status != current.status {
        tracing::info!(
            order_id = id,
            token = %updated.token_number,
            from = %current.status,
            to = %updated.status,
            "Order status changed"
        );
    }
    Ok(updated)
}

/// Kitchen "next step" button
pub async fn advance(pool: &SqlitePool, id: i64) -> AppResult<Order> {
    let current = order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    let next = current.status.next().ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("order is already '{}'", current.status),
        )
    })?;

    update(
        pool,
        id,
        OrderChanges {
            status: Some(next),
            ..Default::default()
        },
    )
    .await
}

/// Admin "cancel" button
pub async fn cancel(pool: &SqlitePool, id: i64) -> AppResult<Order> {
    update(
        pool,
        id,
        OrderChanges {
            status: Some(OrderStatus::Cancelled),
            ..Default::default()
        },
    )
    .await
}

/// Order with its lines, payments and receipts
pub async fn detail(pool: &SqlitePool, order: Order) -> AppResult<OrderDetail> {
    let items = order_item::find_by_order(pool, order.id).await?;
    let payments = payment::find_by_order(pool, order.id).await?;
    let receipts = receipt::find_by_order(pool, order.id).await?;
    Ok(OrderDetail {
        order,
        items,
        payments,
        receipts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing;

    #[test]
    fn test_parse_changes_rejects_unknown_status() {
        let err = parse_changes(OrderUpdate {
            status: Some("Banana".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatus);
    }

    #[test]
    fn test_ensure_transition() {
        assert!(ensure_transition(OrderStatus::Preparing, OrderStatus::Ready).is_ok());
        let err = ensure_transition(OrderStatus::Completed, OrderStatus::Preparing).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        assert_eq!(err.details.unwrap()["from"], "Completed");
    }

    #[tokio::test]
    async fn test_advance_walks_to_completed() {
        let pool = testing::pool().await;
        let o = order::create(&pool, order::sample("TKN1"), 1).await.unwrap();

        let mut seen = vec![];
        for _ in 0..4 {
            seen.push(advance(&pool, o.id).await.unwrap().status);
        }
        assert_eq!(
            seen,
            vec![
                OrderStatus::Confirmed,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Completed
            ]
        );

        let err = advance(&pool, o.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        let err = cancel(&pool, o.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
    }

    #[tokio::test]
    async fn test_same_status_is_noop() {
        let pool = testing::pool().await;
        let o = order::create(&pool, order::sample("TKN1"), 1).await.unwrap();
        let same = update(
            &pool,
            o.id,
            OrderChanges {
                status: Some(OrderStatus::OrderReceived),
                estimated_ready_time: Some("15 min".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(same.status, OrderStatus::OrderReceived);
        assert_eq!(same.estimated_ready_time.as_deref(), Some("15 min"));
    }

    #[tokio::test]
    async fn test_missing_order() {
        let pool = testing::pool().await;
        assert_eq!(advance(&pool, 77).await.unwrap_err().code, ErrorCode::OrderNotFound);
        assert_eq!(
            update(&pool, 77, OrderChanges::default()).await.unwrap_err().code,
            ErrorCode::OrderNotFound
        );
    }
}
