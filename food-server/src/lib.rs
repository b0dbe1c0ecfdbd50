//! Food Server - 点餐后台服务
//!
//! # 架构概述
//!
//! 单进程 HTTP 服务，SQLite 持久化：
//!
//! - **HTTP API** (`api`): 八类资源的 CRUD、订单状态流转、结账
//! - **数据库** (`db`): SQLite 连接池、迁移、按表划分的仓储函数
//! - **业务服务** (`services`): 订单状态机、事务化结账
//! - **金额计算** (`order_money`): Decimal 精确计算，两位小数四舍五入
//!
//! # 模块结构
//!
//! ```text
//! food-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── services/      # 订单生命周期、结账
//! ├── order_money/   # 金额计算
//! ├── utils/         # 错误、提取器、日志、校验
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod order_money;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

use tracing_appender::non_blocking::WorkerGuard;

/// 设置运行环境: 加载 `.env`，初始化日志
///
/// 返回的 guard 必须存活到进程结束，否则文件日志会丢失尾部内容。
pub fn setup_environment() -> anyhow::Result<Option<WorkerGuard>> {
    // .env 不存在不算错误
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;

    Ok(init_logger_with_file(
        Some(&config.log_level),
        config.log_dir.as_deref(),
    ))
}

pub fn print_banner() {
    println!(
        r#"
    ______                __
   / ____/___  ____  ____/ /
  / /_  / __ \/ __ \/ __  /
 / __/ / /_/ / /_/ / /_/ /
/_/    \____/\____/\__,_/
    "#
    );
}
