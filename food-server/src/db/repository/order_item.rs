//! Order Item Repository

use super::{RepoError, RepoResult, push_page};
use shared::ErrorCode;
use shared::models::{OrderItem, OrderItemUpdate};
use shared::request::Page;
use sqlx::{Executor, QueryBuilder, Sqlite};

const COLUMNS: &str = "id, order_id, menu_item_id, quantity, price, created_at";

/// List filters
#[derive(Debug, Clone, Default)]
pub struct OrderItemFilter {
    pub order_id: Option<i64>,
    pub menu_item_id: Option<i64>,
}

/// Row to insert; `price` is the unit price snapshot
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub price: f64,
}

pub async fn find_all<'e, E>(
    db: E,
    filter: &OrderItemFilter,
    page: Page,
) -> RepoResult<Vec<OrderItem>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut qb =
        QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM order_item WHERE 1 = 1"));
    if let Some(order_id) = filter.order_id {
        qb.push(" AND order_id = ").push_bind(order_id);
    }
    if let Some(menu_item_id) = filter.menu_item_id {
        qb.push(" AND menu_item_id = ").push_bind(menu_item_id);
    }
    qb.push(" ORDER BY id ASC");
    push_page(&mut qb, page);
    Ok(qb.build_query_as::<OrderItem>().fetch_all(db).await?)
}

/// Every line of one order (no paging)
pub async fn find_by_order<'e, E>(db: E, order_id: i64) -> RepoResult<Vec<OrderItem>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {COLUMNS} FROM order_item WHERE order_id = ? ORDER BY id ASC"
    ))
    .bind(order_id)
    .fetch_all(db)
    .await?;
    Ok(items)
}

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<OrderItem>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let item =
        sqlx::query_as::<_, OrderItem>(&format!("SELECT {COLUMNS} FROM order_item WHERE id = ?"))
            .bind(id)
            .fetch_optional(db)
            .await?;
    Ok(item)
}

pub async fn create<'e, E>(db: E, data: NewOrderItem, now: i64) -> RepoResult<OrderItem>
where
    E: Executor<'e, Database = Sqlite>,
{
    let item = sqlx::query_as::<_, OrderItem>(&format!(
        "INSERT INTO order_item (order_id, menu_item_id, quantity, price, created_at) VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(data.order_id)
    .bind(data.menu_item_id)
    .bind(data.quantity)
    .bind(data.price)
    .bind(now)
    .fetch_one(db)
    .await?;
    Ok(item)
}

pub async fn update<'e, E>(db: E, id: i64, data: OrderItemUpdate) -> RepoResult<OrderItem>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, OrderItem>(&format!(
        "UPDATE order_item SET quantity = COALESCE(?1, quantity), price = COALESCE(?2, price) WHERE id = ?3 RETURNING {COLUMNS}"
    ))
    .bind(data.quantity)
    .bind(data.price)
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(RepoError::NotFound(ErrorCode::OrderItemNotFound))
}

pub async fn delete<'e, E>(db: E, id: i64) -> RepoResult<OrderItem>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, OrderItem>(&format!(
        "DELETE FROM order_item WHERE id = ? RETURNING {COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(RepoError::NotFound(ErrorCode::OrderItemNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{menu_item, order, testing};
    use shared::models::{MenuItemCreate, MenuItemUpdate};

    #[tokio::test]
    async fn test_price_snapshot_survives_menu_change() {
        let pool = testing::pool().await;
        let burger = menu_item::create(
            &pool,
            MenuItemCreate {
                name: "Burger".into(),
                category: "Mains".into(),
                price: 100.0,
                ..Default::default()
            },
            1,
        )
        .await
        .unwrap();
        let o = order::create(&pool, order::sample("TKN1"), 1).await.unwrap();

        let line = create(
            &pool,
            NewOrderItem {
                order_id: o.id,
                menu_item_id: burger.id,
                quantity: 2,
                price: burger.price,
            },
            1,
        )
        .await
        .unwrap();

        menu_item::update(
            &pool,
            burger.id,
            MenuItemUpdate {
                price: Some(150.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let line = find_by_id(&pool, line.id).await.unwrap().unwrap();
        assert_eq!(line.price, 100.0);
    }

    #[tokio::test]
    async fn test_dangling_order_rejected() {
        let pool = testing::pool().await;
        let err = create(
            &pool,
            NewOrderItem {
                order_id: 404,
                menu_item_id: 404,
                quantity: 1,
                price: 1.0,
            },
            1,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_order_with_items_cannot_be_deleted() {
        let pool = testing::pool().await;
        let dish = menu_item::create(
            &pool,
            MenuItemCreate {
                name: "Soup".into(),
                category: "Starters".into(),
                price: 5.0,
                ..Default::default()
            },
            1,
        )
        .await
        .unwrap();
        let o = order::create(&pool, order::sample("TKN2"), 1).await.unwrap();
        create(
            &pool,
            NewOrderItem {
                order_id: o.id,
                menu_item_id: dish.id,
                quantity: 1,
                price: 5.0,
            },
            1,
        )
        .await
        .unwrap();

        assert!(matches!(order::delete(&pool, o.id).await, Err(RepoError::InUse(_))));
        assert!(matches!(menu_item::delete(&pool, dish.id).await, Err(RepoError::InUse(_))));
    }
}
