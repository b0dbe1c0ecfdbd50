//! Request types shared by the list endpoints
//!
//! Every resource accepts `?id=` for single-record operations and
//! `limit` / `offset` / `search` when listing.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Default page size
pub const DEFAULT_LIMIT: i64 = 10;
/// Largest page a client may request
pub const MAX_LIMIT: i64 = 100;

/// `?id=` on PUT / DELETE / action endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

impl IdQuery {
    /// The id, or `MISSING_ID`
    pub fn require(&self) -> AppResult<i64> {
        self.id.ok_or_else(AppError::missing_id)
    }
}

/// Resolved pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Apply defaults and clamp: limit to `1..=MAX_LIMIT`, offset to `>= 0`
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Search term with surrounding whitespace removed; blank means no search
pub fn search_term(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|s| !s.is_empty())
}
