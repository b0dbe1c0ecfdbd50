//! Shop Repository

use super::{RepoError, RepoResult, push_page, push_search};
use shared::ErrorCode;
use shared::models::{Shop, ShopCreate, ShopUpdate};
use shared::request::Page;
use sqlx::{Executor, QueryBuilder, Sqlite};

const COLUMNS: &str = "id, name, address, phone, email, opening_hours, created_at";

pub async fn find_all<'e, E>(db: E, search: Option<&str>, page: Page) -> RepoResult<Vec<Shop>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM shop WHERE 1 = 1"));
    if let Some(term) = search {
        push_search(&mut qb, &["name", "address"], term);
    }
    qb.push(" ORDER BY id ASC");
    push_page(&mut qb, page);
    Ok(qb.build_query_as::<Shop>().fetch_all(db).await?)
}

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Shop>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let shop = sqlx::query_as::<_, Shop>(&format!("SELECT {COLUMNS} FROM shop WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(shop)
}

pub async fn create<'e, E>(db: E, data: ShopCreate, now: i64) -> RepoResult<Shop>
where
    E: Executor<'e, Database = Sqlite>,
{
    let shop = sqlx::query_as::<_, Shop>(&format!(
        "INSERT INTO shop (name, address, phone, email, opening_hours, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(data.name)
    .bind(data.address)
    .bind(data.phone)
    .bind(data.email)
    .bind(data.opening_hours)
    .bind(now)
    .fetch_one(db)
    .await?;
    Ok(shop)
}

pub async fn update<'e, E>(db: E, id: i64, data: ShopUpdate) -> RepoResult<Shop>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Shop>(&format!(
        "UPDATE shop SET name = COALESCE(?1, name), address = COALESCE(?2, address), phone = COALESCE(?3, phone), email = COALESCE(?4, email), opening_hours = COALESCE(?5, opening_hours) WHERE id = ?6 RETURNING {COLUMNS}"
    ))
    .bind(data.name)
    .bind(data.address)
    .bind(data.phone)
    .bind(data.email)
    .bind(data.opening_hours)
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(RepoError::NotFound(ErrorCode::ShopNotFound))
}

/// Hard delete; returns the removed row
pub async fn delete<'e, E>(db: E, id: i64) -> RepoResult<Shop>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Shop>(&format!("DELETE FROM shop WHERE id = ? RETURNING {COLUMNS}"))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| RepoError::from(e).on_delete(&format!("Shop {id}")))?
        .ok_or(RepoError::NotFound(ErrorCode::ShopNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing;

    fn sample(name: &str, address: &str) -> ShopCreate {
        ShopCreate {
            name: name.into(),
            address: address.into(),
            phone: "555-0100".into(),
            email: None,
            opening_hours: Some("09:00-22:00".into()),
        }
    }

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let pool = testing::pool().await;
        let shop = create(&pool, sample("Downtown", "1 Main St"), 1000).await.unwrap();
        assert_eq!(shop.created_at, 1000);

        let updated = update(
            &pool,
            shop.id,
            ShopUpdate {
                phone: Some("555-0199".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.phone, "555-0199");
        assert_eq!(updated.name, "Downtown");

        let removed = delete(&pool, shop.id).await.unwrap();
        assert_eq!(removed.id, shop.id);
        assert!(find_by_id(&pool, shop.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_rows() {
        let pool = testing::pool().await;
        assert!(matches!(
            update(&pool, 42, ShopUpdate::default()).await,
            Err(RepoError::NotFound(ErrorCode::ShopNotFound))
        ));
        assert!(matches!(
            delete(&pool, 42).await,
            Err(RepoError::NotFound(ErrorCode::ShopNotFound))
        ));
    }

    #[tokio::test]
    async fn test_search_is_case_sensitive() {
        let pool = testing::pool().await;
        create(&pool, sample("Green Cafe", "Elm St"), 1).await.unwrap();
        create(&pool, sample("Burger Barn", "Oak Ave"), 2).await.unwrap();

        let hits = find_all(&pool, Some("Cafe"), Page::default()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(find_all(&pool, Some("cafe"), Page::default()).await.unwrap().is_empty());

        let by_address = find_all(&pool, Some("Oak"), Page::default()).await.unwrap();
        assert_eq!(by_address[0].name, "Burger Barn");
    }
}
