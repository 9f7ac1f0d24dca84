use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::services::{AnalyticsService, SiteService, TrackingService};
use crate::storage::SeaOrmStorage;

/// Everything the HTTP server shares across workers
#[derive(Clone)]
pub struct StartupContext {
    pub config: AppConfig,
    pub storage: Arc<SeaOrmStorage>,
    pub site_service: Arc<SiteService>,
    pub tracking_service: Arc<TrackingService>,
    pub analytics_service: Arc<AnalyticsService>,
}

impl StartupContext {
    /// Wire services around an already opened store.
    pub fn from_storage(config: AppConfig, storage: Arc<SeaOrmStorage>) -> Self {
        Self {
            site_service: Arc::new(SiteService::new(storage.clone())),
            tracking_service: Arc::new(TrackingService::new(
                storage.clone(),
                config.tracking.clone(),
            )),
            analytics_service: Arc::new(AnalyticsService::new(storage.clone())),
            storage,
            config,
        }
    }
}

/// 准备服务器启动的上下文：打开数据库、执行迁移、构建服务
pub async fn prepare_server_startup(config: AppConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = SeaOrmStorage::new(&config.database)
        .await
        .context("Failed to open storage")?;

    let sites = storage
        .count_sites()
        .await
        .context("Failed to read sites table")?;
    info!("{} site(s) registered", sites);

    if config.tracking.verify_site {
        info!("Tracking: unknown siteId values will be rejected");
    }

    let ctx = StartupContext::from_storage(config, Arc::new(storage));
    debug!("Pre-startup completed in {:?}", start_time.elapsed());
    Ok(ctx)
}
