//! Checkout
//!
//! One request creates the order, its lines, one payment and one receipt
//! inside a single transaction. `requestId` makes retries idempotent: a key
//! that already produced an order returns that order instead of writing.
//!
//! Token numbers and transaction ids are random-suffixed; a unique-index
//! collision rolls the attempt back and retries with fresh values.

use serde_json::json;
use sqlx::SqlitePool;

use shared::models::{CheckoutRequest, CheckoutResult, MenuItem, Order};
use shared::order::{DeliveryMode, OrderStatus, PaymentStatus};
use shared::{AppError, AppResult, ErrorCode};

use crate::db::repository::order::NewOrder;
use crate::db::repository::order_item::NewOrderItem;
use crate::db::repository::payment::NewPayment;
use crate::db::repository::{
    RepoError, menu_item, offer, order, order_item, payment, receipt,
};
use crate::order_money::{Totals, to_f64};

/// Attempts before a token / transaction id collision is reported
const MAX_ATTEMPTS: usize = 3;

const REQUEST_ID_INDEX: &str = "orders.request_id";

enum Attempt {
    Done(CheckoutResult),
    /// A unique index rejected a generated value (`table.column`)
    Collision(String),
}

/// Source of the generated identifiers a checkout writes
pub trait IdSource: Send + Sync {
    fn token_number(&self) -> String;
    fn transaction_id(&self) -> String;
}

/// Random-suffixed identifiers from [`shared::util`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn token_number(&self) -> String {
        shared::util::token_number()
    }

    fn transaction_id(&self) -> String {
        shared::util::transaction_id()
    }
}

/// Run a checkout (payload already normalized and validated)
pub async fn checkout(pool: &SqlitePool, req: CheckoutRequest) -> AppResult<CheckoutResult> {
    checkout_with(pool, req, &RandomIds).await
}

pub async fn checkout_with(
    pool: &SqlitePool,
    req: CheckoutRequest,
    ids: &impl IdSource,
) -> AppResult<CheckoutResult> {
    let delivery_mode: DeliveryMode = req.delivery_mode.parse()?;

    if let Some(existing) = order::find_by_request_id(pool, &req.request_id).await? {
        tracing::info!(request_id = %req.request_id, order_id = existing.id, "Checkout replayed");
        return replay(pool, existing).await;
    }

    for attempt in 1..=MAX_ATTEMPTS {
        match attempt_checkout(pool, &req, delivery_mode, ids).await? {
            Attempt::Done(result) => {
                tracing::info!(
                    request_id = %req.request_id,
                    order_id = result.order.id,
                    token = %result.order.token_number,
                    amount = result.order.final_amount,
                    "Checkout completed"
                );
                return Ok(result);
            }
            Attempt::Collision(index) if index == REQUEST_ID_INDEX => {
                // Same key committed by a concurrent request
                let existing = order::find_by_request_id(pool, &req.request_id)
                    .await?
                    .ok_or_else(|| AppError::internal("checkout key vanished after conflict"))?;
                return replay(pool, existing).await;
            }
            Attempt::Collision(index) => {
                tracing::warn!(attempt, index = %index, "Generated identifier collided, retrying");
            }
        }
    }

    Err(AppError::internal(
        "could not generate a unique token number or transaction id",
    ))
}

/// Rebuild the result of an earlier checkout
async fn replay(pool: &SqlitePool, order: Order) -> AppResult<CheckoutResult> {
    let items = order_item::find_by_order(pool, order.id).await?;
    let payment = payment::find_by_order(pool, order.id).await?.into_iter().next();
    let receipt = receipt::find_by_order(pool, order.id).await?.into_iter().next();
    Ok(CheckoutResult {
        order,
        items,
        payment,
        receipt,
        replayed: true,
    })
}

/// Split a repository error into "retry with new ids" and real failures
fn collision_or<T>(result: Result<T, RepoError>) -> AppResult<Result<T, String>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(RepoError::Duplicate { index, .. }) => Ok(Err(index)),
        Err(e) => Err(e.into()),
    }
}

async fn attempt_checkout(
    pool: &SqlitePool,
    req: &CheckoutRequest,
    delivery_mode: DeliveryMode,
    ids: &impl IdSource,
) -> AppResult<Attempt> {
    // Write lock up front; concurrent checkouts wait on busy_timeout
    let mut tx = pool
        .begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(RepoError::from)?;

    // 1. Menu prices, read inside the transaction
    let mut lines: Vec<(MenuItem, i64)> = Vec::with_capacity(req.items.len());
    for line in &req.items {
        let item = menu_item::find_by_id(&mut *tx, line.menu_item_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::MenuItemNotFound).with_detail("menuItemId", line.menu_item_id)
            })?;
        if !item.available {
            return Err(AppError::with_message(
                ErrorCode::MenuItemUnavailable,
                format!("'{}' is currently unavailable", item.name),
            )
            .with_detail("menuItemId", item.id));
        }
        lines.push((item, line.quantity));
    }

    // 2. Offer
    let discount_percent = match req.offer_id {
        None => None,
        Some(offer_id) => {
            let found = offer::find_by_id(&mut *tx, offer_id)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::OfferNotFound).with_detail("offerId", offer_id))?;
            if !found.is_active_at(&shared::util::now_rfc3339()) {
                return Err(AppError::new(ErrorCode::OfferNotActive).with_detail("offerId", offer_id));
            }
            Some(found.discount_percent)
        }
    };

    // 3. Totals
    let priced: Vec<(f64, i64)> = lines.iter().map(|(item, qty)| (item.price, *qty)).collect();
    let totals = Totals::compute(&priced, discount_percent)?;
    let final_amount = to_f64(totals.final_amount);
    if final_amount <= 0.0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            "order total after discount must be greater than 0",
        ));
    }
    let payment_status = PaymentStatus::for_payment_mode(&req.payment_mode);
    let now = shared::util::now_millis();

    // 4. Order
    let new_order = NewOrder {
        customer_id: req.customer_id,
        token_number: ids.token_number(),
        subtotal: to_f64(totals.subtotal),
        discount: to_f64(totals.discount),
        final_amount,
        status: OrderStatus::OrderReceived,
        delivery_mode,
        payment_status,
        estimated_ready_time: req.estimated_ready_time.clone(),
        request_id: Some(req.request_id.clone()),
    };
    let order = match collision_or(order::create(&mut *tx, new_order, now).await)? {
        Ok(order) => order,
        Err(index) => return Ok(Attempt::Collision(index)),
    };

    // 5. Lines (unit price snapshot)
    let mut items = Vec::with_capacity(lines.len());
    for (item, quantity) in &lines {
        let created = order_item::create(
            &mut *tx,
            NewOrderItem {
                order_id: order.id,
                menu_item_id: item.id,
                quantity: *quantity,
                price: item.price,
            },
            now,
        )
        .await?;
        items.push(created);
    }

    // 6. Payment
    let new_payment = NewPayment {
        order_id: order.id,
        transaction_id: ids.transaction_id(),
        payment_mode: req.payment_mode.clone(),
        amount_paid: final_amount,
        payment_status,
    };
    let payment = match collision_or(payment::create(&mut *tx, new_payment, now).await)? {
        Ok(payment) => payment,
        Err(index) => return Ok(Attempt::Collision(index)),
    };

    // 7. Receipt
    let receipt_data = json!({
        "tokenNumber": order.token_number,
        "items": lines.iter().map(|(item, qty)| json!({
            "menuItemId": item.id,
            "name": item.name,
            "quantity": qty,
            "unitPrice": item.price,
        })).collect::<Vec<_>>(),
        "subtotal": order.subtotal,
        "discount": order.discount,
        "finalAmount": order.final_amount,
        "deliveryMode": order.delivery_mode,
        "paymentMode": payment.payment_mode,
        "paymentStatus": payment.payment_status,
        "transactionId": payment.transaction_id,
    })
    .to_string();
    let receipt = receipt::create(&mut *tx, order.id, receipt_data, now).await?;

    tx.commit().await.map_err(RepoError::from)?;

    Ok(Attempt::Done(CheckoutResult {
        order,
        items,
        payment: Some(payment),
        receipt: Some(receipt),
        replayed: false,
    }))
}
