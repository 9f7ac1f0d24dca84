//! SeaORM storage backend
//!
//! SQLite in WAL mode. Every mutation goes through a single-writer gate and
//! commits in its own transaction; reads run concurrently over the pool.

mod analytics;
mod connection;
mod converters;
mod mutations;
mod query;

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::errors::{PrivalyticsError, Result};

pub use analytics::{DailyCountRow, DeviceRow, PageRow, ReferrerRow};
pub use connection::{connect_sqlite, run_migrations};
pub use converters::{model_to_site, new_event_to_active_model, site_to_active_model};

#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    /// 写入串行化：同一时刻只有一个事务在写
    write_gate: Arc<Mutex<()>>,
}

impl SeaOrmStorage {
    /// Open (or create) the database file and bring the schema up to date.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        if config.path.trim().is_empty() {
            return Err(PrivalyticsError::database_config("database.path is empty"));
        }

        let db = connect_sqlite(
            &config.path,
            config.max_connections,
            Duration::from_secs(config.busy_timeout_secs),
        )
        .await?;

        run_migrations(&db).await?;

        warn!("SQLITE storage initialized at {}", config.path);
        Ok(Self::from_connection(db))
    }

    /// Wrap an already-migrated connection.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            db,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Readiness check: round-trip to the database.
    pub async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| PrivalyticsError::database_connection(format!("Ping failed: {}", e)))
    }

    /// Close the pool. Waits for in-flight writes to finish first.
    pub async fn close(&self) -> Result<()> {
        let _guard = self.write_gate.lock().await;
        self.db.clone().close().await.map_err(|e| {
            PrivalyticsError::database_connection(format!("Failed to close database: {}", e))
        })?;
        info!("Database connection closed");
        Ok(())
    }
}
