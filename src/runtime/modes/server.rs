//! Server mode
//!
//! Opens the store, starts the HTTP server and tears both down in order on
//! a shutdown signal.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::configure_routes;
use crate::config::AppConfig;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: AppConfig) -> Result<()> {
    let ctx = lifetime::startup::prepare_server_startup(config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let server_config = ctx.config.server.clone();
    let workers = server_config.workers.clamp(1, 32);
    warn!("Using {} worker(s) for the server", workers);

    if server_config.trusted_proxies.is_empty() {
        info!("No trusted proxies configured; forwarding headers are ignored");
    } else {
        info!("Trusted proxies: {:?}", server_config.trusted_proxies);
    }

    let storage = ctx.storage.clone();
    let app_ctx = ctx.clone();

    let bind_address = format!("{}:{}", server_config.host, server_config.port);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
            .app_data(web::Data::new(app_ctx.config.clone()))
            .app_data(web::Data::new(app_ctx.storage.clone()))
            .app_data(web::Data::new(app_ctx.site_service.clone()))
            .app_data(web::Data::new(app_ctx.tracking_service.clone()))
            .app_data(web::Data::new(app_ctx.analytics_service.clone()))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(workers)
    .disable_signals()
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    warn!("Starting server at http://{}", bind_address);
    let handle = server.handle();
    let server_task = actix_web::rt::spawn(server);

    tokio::select! {
        res = server_task => {
            res.context("Server task panicked")??;
        }
        _ = lifetime::shutdown::wait_for_signal() => {
            handle.stop(true).await;
        }
    }

    lifetime::shutdown::close_storage(&storage).await;
    warn!("Graceful shutdown: all tasks completed");
    Ok(())
}
