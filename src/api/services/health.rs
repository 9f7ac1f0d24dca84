use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, trace};

use crate::storage::SeaOrmStorage;

const READY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

impl HealthResponse {
    fn now(status: &'static str) -> Self {
        Self {
            status,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

pub struct HealthService;

impl HealthService {
    /// 存活检查，不访问数据库
    pub async fn health_check() -> impl Responder {
        trace!("Received health check request");
        HttpResponse::Ok().json(HealthResponse::now("ok"))
    }

    /// 就绪检查：数据库可达才返回 200
    pub async fn readiness_check(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        trace!("Received readiness check request");

        match tokio::time::timeout(READY_TIMEOUT, storage.ping()).await {
            Ok(Ok(())) => HttpResponse::Ok().json(HealthResponse::now("ok")),
            Ok(Err(e)) => {
                error!("Readiness check failed: {}", e);
                HttpResponse::ServiceUnavailable().json(HealthResponse::now("unavailable"))
            }
            Err(_) => {
                error!("Readiness check timed out");
                HttpResponse::ServiceUnavailable().json(HealthResponse::now("unavailable"))
            }
        }
    }
}

/// Health 路由配置，挂载在 `/health` 下
pub fn health_routes() -> actix_web::Scope {
    web::scope("")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/ready", web::head().to(HealthService::readiness_check))
}
