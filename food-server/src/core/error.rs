use thiserror::Error;

/// 服务器启动 / 运行错误
///
/// 请求级错误使用 `AppError`；这里只覆盖进程级失败。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("数据库初始化失败: {0}")]
    Database(String),

    #[error("工作目录不可用: {0}")]
    WorkDir(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 服务器 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
