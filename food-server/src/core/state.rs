use std::path::Path;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;

/// 服务器状态 - 所有请求共享
///
/// 只持有不可变配置和数据库连接池，`Clone` 成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    pub fn new(config: Config, db: DbService) -> Self {
        Self { config, db }
    }

    /// 初始化服务器状态
    ///
    /// 1. 确保工作目录存在
    /// 2. 打开数据库并执行迁移
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        if let Some(parent) = Path::new(&config.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = DbService::new(&config.database_path, config.db_max_connections)
            .await
            .map_err(|e| ServerError::Database(e.message))?;

        Ok(Self::new(config.clone(), db))
    }

    /// 内存数据库状态 (测试用)
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::in_memory()
            .await
            .map_err(|e| ServerError::Database(e.message))?;
        Ok(Self::new(config, db))
    }

    /// 获取连接池
    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.db.pool
    }
}
