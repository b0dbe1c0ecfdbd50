//! Receipt Repository

use super::{RepoError, RepoResult, push_page, push_search};
use shared::ErrorCode;
use shared::models::{Receipt, ReceiptUpdate};
use shared::request::Page;
use sqlx::{Executor, QueryBuilder, Sqlite};

const COLUMNS: &str = "id, order_id, receipt_data, created_at";

/// List filters
#[derive(Debug, Clone, Default)]
pub struct ReceiptFilter {
    pub search: Option<String>,
    pub order_id: Option<i64>,
}

pub async fn find_all<'e, E>(db: E, filter: &ReceiptFilter, page: Page) -> RepoResult<Vec<Receipt>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM receipt WHERE 1 = 1"));
    if let Some(term) = filter.search.as_deref() {
        push_search(&mut qb, &["receipt_data"], term);
    }
    if let Some(order_id) = filter.order_id {
        qb.push(" AND order_id = ").push_bind(order_id);
    }
    qb.push(" ORDER BY id ASC");
    push_page(&mut qb, page);
    Ok(qb.build_query_as::<Receipt>().fetch_all(db).await?)
}

pub async fn find_by_order<'e, E>(db: E, order_id: i64) -> RepoResult<Vec<Receipt>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let receipts = sqlx::query_as::<_, Receipt>(&format!(
        "SELECT {COLUMNS} FROM receipt WHERE order_id = ? ORDER BY id ASC"
    ))
    .bind(order_id)
    .fetch_all(db)
    .await?;
    Ok(receipts)
}

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Receipt>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let receipt =
        sqlx::query_as::<_, Receipt>(&format!("SELECT {COLUMNS} FROM receipt WHERE id = ?"))
            .bind(id)
            .fetch_optional(db)
            .await?;
    Ok(receipt)
}

pub async fn create<'e, E>(db: E, order_id: i64, receipt_data: String, now: i64) -> RepoResult<Receipt>
where
    E: Executor<'e, Database = Sqlite>,
{
    let receipt = sqlx::query_as::<_, Receipt>(&format!(
        "INSERT INTO receipt (order_id, receipt_data, created_at) VALUES (?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(order_id)
    .bind(receipt_data)
    .bind(now)
    .fetch_one(db)
    .await?;
    Ok(receipt)
}

pub async fn update<'e, E>(db: E, id: i64, data: ReceiptUpdate) -> RepoResult<Receipt>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Receipt>(&format!(
        "UPDATE receipt SET receipt_data = COALESCE(?1, receipt_data) WHERE id = ?2 RETURNING {COLUMNS}"
    ))
    .bind(data.receipt_data)
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(RepoError::NotFound(ErrorCode::ReceiptNotFound))
}

pub async fn delete<'e, E>(db: E, id: i64) -> RepoResult<Receipt>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Receipt>(&format!("DELETE FROM receipt WHERE id = ? RETURNING {COLUMNS}"))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(RepoError::NotFound(ErrorCode::ReceiptNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{order, testing};

    #[tokio::test]
    async fn test_search_receipt_text() {
        let pool = testing::pool().await;
        let o = order::create(&pool, order::sample("TKN1"), 1).await.unwrap();
        create(&pool, o.id, r#"{"token":"TKN1","total":100}"#.into(), 1).await.unwrap();
        create(&pool, o.id, "plain text".into(), 2).await.unwrap();

        let filter = ReceiptFilter {
            search: Some("TKN1".into()),
            ..Default::default()
        };
        assert_eq!(find_all(&pool, &filter, Page::default()).await.unwrap().len(), 1);

        let filter = ReceiptFilter {
            order_id: Some(o.id),
            ..Default::default()
        };
        assert_eq!(find_all(&pool, &filter, Page::default()).await.unwrap().len(), 2);
        assert_eq!(find_by_order(&pool, o.id).await.unwrap().len(), 2);
    }
}
