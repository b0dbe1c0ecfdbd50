//! Repository Module
//!
//! One module of free functions per table. Functions take any SQLite
//! executor, so the same code runs against the pool or inside a checkout
//! transaction (`&mut *tx`).
//!
//! Writes are single statements with `RETURNING`, which makes "row was
//! missing" and "row changed" the same round trip.

pub mod customer;
pub mod menu_item;
pub mod offer;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod receipt;
pub mod shop;

use shared::ErrorCode;
use shared::request::Page;
use sqlx::{QueryBuilder, Sqlite};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(ErrorCode),

    /// A unique index rejected the write; `index` is `table.column`
    #[error("Duplicate value for {index}")]
    Duplicate { code: ErrorCode, index: String },

    #[error("Conflict: {1}")]
    Conflict(ErrorCode, String),

    /// Insert/update pointed at a parent row that does not exist
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Delete of a row that other rows still point at
    #[error("Still referenced: {0}")]
    InUse(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    /// Map a foreign-key failure on DELETE to [`RepoError::InUse`]
    pub fn on_delete(self, what: &str) -> Self {
        match self {
            RepoError::InvalidReference(_) => {
                RepoError::InUse(format!("{what} is still referenced by other records"))
            }
            other => other,
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                // SQLite: "UNIQUE constraint failed: customer.email"
                let index = db_err
                    .message()
                    .rsplit(": ")
                    .next()
                    .unwrap_or_default()
                    .to_string();
                return RepoError::Duplicate {
                    code: duplicate_code(&index),
                    index,
                };
            }
            if db_err.is_foreign_key_violation() {
                return RepoError::InvalidReference(
                    "referenced record does not exist".to_string(),
                );
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Error code for a unique index (`table.column`)
fn duplicate_code(index: &str) -> ErrorCode {
    match index {
        "customer.email" => ErrorCode::DuplicateEmail,
        "orders.token_number" => ErrorCode::DuplicateTokenNumber,
        "payment.transaction_id" => ErrorCode::DuplicateTransactionId,
        _ => ErrorCode::ValidationFailed,
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// List query helpers
// =============================================================================

/// `AND (instr(a, ?) > 0 OR instr(b, ?) > 0 ...)`
///
/// `instr` keeps the match case-sensitive; `LIKE` would fold ASCII case.
pub(crate) fn push_search(qb: &mut QueryBuilder<'_, Sqlite>, columns: &[&str], term: &str) {
    qb.push(" AND (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(format!("instr({column}, "))
            .push_bind(term.to_string())
            .push(") > 0");
    }
    qb.push(")");
}

/// ` LIMIT ? OFFSET ?`
pub(crate) fn push_page(qb: &mut QueryBuilder<'_, Sqlite>, page: Page) {
    qb.push(" LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);
}

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::SqlitePool;

    /// Migrated in-memory database
    pub async fn pool() -> SqlitePool {
        crate::db::DbService::in_memory().await.unwrap().pool
    }
}
