//! Menu Item Repository

use super::{RepoError, RepoResult, push_page, push_search};
use shared::ErrorCode;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::request::Page;
use sqlx::{Executor, QueryBuilder, Sqlite};

const COLUMNS: &str = "id, name, category, price, available, description, image_url, created_at";

/// List filters
#[derive(Debug, Clone, Default)]
pub struct MenuItemFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

pub async fn find_all<'e, E>(db: E, filter: &MenuItemFilter, page: Page) -> RepoResult<Vec<MenuItem>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut qb =
        QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM menu_item WHERE 1 = 1"));
    if let Some(term) = filter.search.as_deref() {
        push_search(&mut qb, &["name", "description"], term);
    }
    if let Some(category) = &filter.category {
        qb.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(available) = filter.available {
        qb.push(" AND available = ").push_bind(available);
    }
    qb.push(" ORDER BY id ASC");
    push_page(&mut qb, page);
    Ok(qb.build_query_as::<MenuItem>().fetch_all(db).await?)
}

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<MenuItem>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let item =
        sqlx::query_as::<_, MenuItem>(&format!("SELECT {COLUMNS} FROM menu_item WHERE id = ?"))
            .bind(id)
            .fetch_optional(db)
            .await?;
    Ok(item)
}

pub async fn create<'e, E>(db: E, data: MenuItemCreate, now: i64) -> RepoResult<MenuItem>
where
    E: Executor<'e, Database = Sqlite>,
{
    let item = sqlx::query_as::<_, MenuItem>(&format!(
        "INSERT INTO menu_item (name, category, price, available, description, image_url, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(data.name)
    .bind(data.category)
    .bind(data.price)
    .bind(data.available.unwrap_or(true))
    .bind(data.description)
    .bind(data.image_url)
    .bind(now)
    .fetch_one(db)
    .await?;
    Ok(item)
}

pub async fn update<'e, E>(db: E, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, MenuItem>(&format!(
        "UPDATE menu_item SET name = COALESCE(?1, name), category = COALESCE(?2, category), price = COALESCE(?3, price), available = COALESCE(?4, available), description = COALESCE(?5, description), image_url = COALESCE(?6, image_url) WHERE id = ?7 RETURNING {COLUMNS}"
    ))
    .bind(data.name)
    .bind(data.category)
    .bind(data.price)
    .bind(data.available)
    .bind(data.description)
    .bind(data.image_url)
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(RepoError::NotFound(ErrorCode::MenuItemNotFound))
}

pub async fn delete<'e, E>(db: E, id: i64) -> RepoResult<MenuItem>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, MenuItem>(&format!(
        "DELETE FROM menu_item WHERE id = ? RETURNING {COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
    .map_err(|e| RepoError::from(e).on_delete(&format!("Menu item {id}")))?
    .ok_or(RepoError::NotFound(ErrorCode::MenuItemNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing;

    fn item(name: &str, category: &str, price: f64) -> MenuItemCreate {
        MenuItemCreate {
            name: name.into(),
            category: category.into(),
            price,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_available_defaults_true() {
        let pool = testing::pool().await;
        let burger = create(&pool, item("Burger", "Mains", 100.0), 1).await.unwrap();
        assert!(burger.available);
        assert_eq!(burger.price, 100.0);
    }

    #[tokio::test]
    async fn test_filters() {
        let pool = testing::pool().await;
        create(&pool, item("Burger", "Mains", 100.0), 1).await.unwrap();
        create(&pool, item("Fries", "Sides", 40.0), 1).await.unwrap();
        let soda = create(&pool, item("Soda", "Drinks", 20.0), 1).await.unwrap();
        update(
            &pool,
            soda.id,
            MenuItemUpdate {
                available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let mains = MenuItemFilter {
            category: Some("Mains".into()),
            ..Default::default()
        };
        assert_eq!(find_all(&pool, &mains, Page::default()).await.unwrap().len(), 1);

        let available = MenuItemFilter {
            available: Some(true),
            ..Default::default()
        };
        let names: Vec<_> = find_all(&pool, &available, Page::default())
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Burger", "Fries"]);
    }

    #[tokio::test]
    async fn test_pagination_window() {
        let pool = testing::pool().await;
        for i in 0..5 {
            create(&pool, item(&format!("Dish {i}"), "Mains", 10.0), 1).await.unwrap();
        }
        let page = find_all(&pool, &MenuItemFilter::default(), Page::new(Some(2), Some(3)))
            .await
            .unwrap();
        let names: Vec<_> = page.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Dish 3", "Dish 4"]);
    }
}
