//! 统一错误处理
//!
//! 错误类型来自 `shared::error`；这里补充框架相关的转换：
//! - [`RepoError`] -> [`AppError`]
//! - axum 提取器拒绝 -> `INVALID_REQUEST`
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::new(ErrorCode::OrderNotFound))
//! ```

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

use axum::extract::rejection::{JsonRejection, QueryRejection};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(code) => AppError::new(code),
            RepoError::Duplicate { code, .. } => AppError::new(code),
            RepoError::Conflict(code, msg) => AppError::with_message(code, msg),
            RepoError::InvalidReference(msg) => {
                AppError::with_message(ErrorCode::InvalidReference, msg)
            }
            RepoError::InUse(msg) => AppError::with_message(ErrorCode::ReferenceInUse, msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Body that is not JSON, or JSON of the wrong shape
pub fn from_json_rejection(rejection: JsonRejection) -> AppError {
    AppError::invalid_request(rejection.body_text())
}

/// Query string that does not deserialize (`?limit=abc`)
pub fn from_query_rejection(rejection: QueryRejection) -> AppError {
    AppError::invalid_request(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_repo_error_mapping() {
        let err: AppError = RepoError::NotFound(ErrorCode::ShopNotFound).into();
        assert_eq!(err.code, ErrorCode::ShopNotFound);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err: AppError = RepoError::Duplicate {
            code: ErrorCode::DuplicateEmail,
            index: "customer.email".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::DuplicateEmail);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);

        let err: AppError = RepoError::InUse("order 1 is still referenced".into()).into();
        assert_eq!(err.code, ErrorCode::ReferenceInUse);

        let err: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_conflict_is_409() {
        let err: AppError = RepoError::Conflict(
            ErrorCode::OrderStatusConflict,
            "order status changed concurrently".into(),
        )
        .into();
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
    }
}
