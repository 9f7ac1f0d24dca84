use std::str::FromStr;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::{PrivalyticsError, Result};
use migration::{Migrator, MigratorTrait};

/// 连接 SQLite 数据库（带自动创建和 WAL 模式）
///
/// `path` is either a plain file path or a `sqlite:` URL.
pub async fn connect_sqlite(
    path: &str,
    max_connections: u32,
    busy_timeout: Duration,
) -> Result<DatabaseConnection> {
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
    };

    let opt = if path.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(path).map_err(|e| {
            PrivalyticsError::database_config(format!("Invalid SQLite URL {}: {}", path, e))
        })?
    } else {
        SqliteConnectOptions::new().filename(path)
    };

    let opt = opt
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(busy_timeout)
        .pragma("temp_store", "memory");

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(opt)
        .await
        .map_err(|e| {
            PrivalyticsError::database_connection(format!(
                "Failed to open SQLite database {}: {}",
                path, e
            ))
        })?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// 运行数据库迁移（幂等）
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .map_err(|e| PrivalyticsError::database_operation(format!("Migration failed: {}", e)))?;

    info!("Database migrations completed");
    Ok(())
}
