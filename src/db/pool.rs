use crate::config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let mut connect_options = PgConnectOptions::from_str(&config.url)?;

    if let Some(name) = config.name.as_deref() {
        connect_options = connect_options.database(name);
    }

    // 设置慢查询日志阈值为 5秒
    connect_options = connect_options.log_slow_statements(
        tracing::log::LevelFilter::Warn,
        Duration::from_secs(5),
    );

    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(connect_options)
        .await
}

/// 执行内嵌迁移 (建表)
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
