//! Shared fixtures: a throwaway SQLite file per test plus the wired services.

#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use tempfile::TempDir;

use privalytics::config::{AppConfig, DatabaseConfig};
use privalytics::runtime::lifetime::startup::StartupContext;
use privalytics::storage::SeaOrmStorage;

pub struct TestEnv {
    pub ctx: StartupContext,
    // Keeps the database file alive for the duration of the test
    pub dir: TempDir,
}

pub async fn setup() -> TestEnv {
    setup_with(AppConfig::default()).await
}

pub async fn setup_with(mut config: AppConfig) -> TestEnv {
    let dir = TempDir::new().expect("Failed to create temp dir");
    config.database = DatabaseConfig {
        path: dir.path().join("privalytics-test.db").display().to_string(),
        ..DatabaseConfig::default()
    };

    let storage = SeaOrmStorage::new(&config.database)
        .await
        .expect("Failed to open test storage");
    let ctx = StartupContext::from_storage(config, Arc::new(storage));
    TestEnv { ctx, dir }
}

/// Build an actix test service over the full route table.
macro_rules! init_app {
    ($ctx:expr) => {{
        let ctx = &$ctx;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(ctx.config.clone()))
                .app_data(actix_web::web::Data::new(ctx.storage.clone()))
                .app_data(actix_web::web::Data::new(ctx.site_service.clone()))
                .app_data(actix_web::web::Data::new(ctx.tracking_service.clone()))
                .app_data(actix_web::web::Data::new(ctx.analytics_service.clone()))
                .configure(privalytics::api::configure_routes),
        )
        .await
    }};
}
