pub mod health;
pub mod helpers;
pub mod sites;
pub mod stats;
pub mod track;

use actix_web::web;

use crate::api::middleware::ApiKeyAuth;

pub use health::{HealthService, health_routes};
pub use sites::SiteHandlers;
pub use stats::StatsHandlers;
pub use track::TrackHandlers;

/// `/api` 路由：公开的注册与上报，其余需要 API key
///
/// Authenticated routes are wrapped one resource at a time, so unknown
/// paths under `/api` fall through to 404 instead of the key check.
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .app_data(helpers::json_config())
        .route("/sites", web::post().to(SiteHandlers::register))
        .route("/track", web::post().to(TrackHandlers::track))
        .service(
            web::resource("/stats")
                .wrap(ApiKeyAuth)
                .route(web::get().to(StatsHandlers::summary)),
        )
        .service(
            web::resource("/timeseries")
                .wrap(ApiKeyAuth)
                .route(web::get().to(StatsHandlers::timeseries)),
        )
        .service(
            web::resource("/pages")
                .wrap(ApiKeyAuth)
                .route(web::get().to(StatsHandlers::pages)),
        )
        .service(
            web::resource("/referrers")
                .wrap(ApiKeyAuth)
                .route(web::get().to(StatsHandlers::referrers)),
        )
        .service(
            web::resource("/devices")
                .wrap(ApiKeyAuth)
                .route(web::get().to(StatsHandlers::devices)),
        )
}

/// Mount every route on an app. Shared app data is registered by the caller.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").service(health_routes()))
        .service(api_routes());
}
