//! Customer Repository

use super::{RepoError, RepoResult, push_page, push_search};
use shared::ErrorCode;
use shared::models::{Customer, CustomerCreate, CustomerUpdate};
use shared::request::Page;
use sqlx::{Executor, QueryBuilder, Sqlite};

const COLUMNS: &str = "id, name, email, phone, address, latitude, longitude, created_at";

pub async fn find_all<'e, E>(db: E, search: Option<&str>, page: Page) -> RepoResult<Vec<Customer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut qb =
        QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM customer WHERE 1 = 1"));
    if let Some(term) = search {
        push_search(&mut qb, &["name", "email", "phone"], term);
    }
    qb.push(" ORDER BY id ASC");
    push_page(&mut qb, page);
    Ok(qb.build_query_as::<Customer>().fetch_all(db).await?)
}

pub async fn find_by_id<'e, E>(db: E, id: i64) -> RepoResult<Option<Customer>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let customer =
        sqlx::query_as::<_, Customer>(&format!("SELECT {COLUMNS} FROM customer WHERE id = ?"))
            .bind(id)
            .fetch_optional(db)
            .await?;
    Ok(customer)
}

/// `email` must already be lower-cased; the unique index is on the stored value
pub async fn create<'e, E>(db: E, data: CustomerCreate, now: i64) -> RepoResult<Customer>
where
    E: Executor<'e, Database = Sqlite>,
{
    let customer = sqlx::query_as::<_, Customer>(&format!(
        "INSERT INTO customer (name, email, phone, address, latitude, longitude, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(data.name)
    .bind(data.email)
    .bind(data.phone)
    .bind(data.address)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(now)
    .fetch_one(db)
    .await?;
    Ok(customer)
}

pub async fn update<'e, E>(db: E, id: i64, data: CustomerUpdate) -> RepoResult<Customer>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Customer>(&format!(
        "UPDATE customer SET name = COALESCE(?1, name), email = COALESCE(?2, email), phone = COALESCE(?3, phone), address = COALESCE(?4, address), latitude = COALESCE(?5, latitude), longitude = COALESCE(?6, longitude) WHERE id = ?7 RETURNING {COLUMNS}"
    ))
    .bind(data.name)
    .bind(data.email)
    .bind(data.phone)
    .bind(data.address)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(RepoError::NotFound(ErrorCode::CustomerNotFound))
}

pub async fn delete<'e, E>(db: E, id: i64) -> RepoResult<Customer>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Customer>(&format!(
        "DELETE FROM customer WHERE id = ? RETURNING {COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
    .map_err(|e| RepoError::from(e).on_delete(&format!("Customer {id}")))?
    .ok_or(RepoError::NotFound(ErrorCode::CustomerNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing;

    fn sample(email: &str) -> CustomerCreate {
        CustomerCreate {
            name: "Jane".into(),
            email: email.into(),
            phone: "555-0100".into(),
            address: "1 Main St".into(),
            latitude: None,
            longitude: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let pool = testing::pool().await;
        create(&pool, sample("jane@example.com"), 1).await.unwrap();
        let err = create(&pool, sample("jane@example.com"), 2).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Duplicate { code: ErrorCode::DuplicateEmail, .. }
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let pool = testing::pool().await;
        let c = create(&pool, sample("a@example.com"), 1).await.unwrap();
        let c = update(
            &pool,
            c.id,
            CustomerUpdate {
                latitude: Some(12.5),
                longitude: Some(77.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(c.email, "a@example.com");
        assert_eq!(c.latitude, Some(12.5));
    }

    #[tokio::test]
    async fn test_customer_with_orders_cannot_be_deleted() {
        let pool = testing::pool().await;
        let c = create(&pool, sample("b@example.com"), 1).await.unwrap();
        sqlx::query(
            "INSERT INTO orders (customer_id, token_number, subtotal, final_amount, delivery_mode, created_at, updated_at) VALUES (?, 'TKN1', 10, 10, 'Pickup', 1, 1)",
        )
        .bind(c.id)
        .execute(&pool)
        .await
        .unwrap();

        let err = delete(&pool, c.id).await.unwrap_err();
        assert!(matches!(err, RepoError::InUse(_)));
        assert!(find_by_id(&pool, c.id).await.unwrap().is_some());
    }
}
