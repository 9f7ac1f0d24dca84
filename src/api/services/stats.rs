//! Authenticated read endpoints. The site comes from the API key, never from
//! the query string.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::middleware::AuthenticatedSite;
use crate::errors::PrivalyticsError;
use crate::services::AnalyticsService;
use crate::storage::TimeseriesMetric;

/// GET /api/timeseries 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct TimeseriesQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub metric: Option<String>,
}

pub struct StatsHandlers;

impl StatsHandlers {
    pub async fn summary(
        site: AuthenticatedSite,
        service: web::Data<Arc<AnalyticsService>>,
    ) -> Result<HttpResponse, PrivalyticsError> {
        let summary = service.summary(&site.site_id).await?;
        Ok(HttpResponse::Ok().json(summary))
    }

    pub async fn timeseries(
        site: AuthenticatedSite,
        service: web::Data<Arc<AnalyticsService>>,
        query: web::Query<TimeseriesQuery>,
    ) -> Result<HttpResponse, PrivalyticsError> {
        let metric = TimeseriesMetric::from_param(query.metric.as_deref());
        let points = service
            .timeseries(
                &site.site_id,
                query.start.as_deref(),
                query.end.as_deref(),
                metric,
            )
            .await?;
        Ok(HttpResponse::Ok().json(points))
    }

    pub async fn pages(
        site: AuthenticatedSite,
        service: web::Data<Arc<AnalyticsService>>,
    ) -> Result<HttpResponse, PrivalyticsError> {
        let pages = service.top_pages(&site.site_id).await?;
        Ok(HttpResponse::Ok().json(pages))
    }

    pub async fn referrers(
        site: AuthenticatedSite,
        service: web::Data<Arc<AnalyticsService>>,
    ) -> Result<HttpResponse, PrivalyticsError> {
        let referrers = service.top_referrers(&site.site_id).await?;
        Ok(HttpResponse::Ok().json(referrers))
    }

    pub async fn devices(
        site: AuthenticatedSite,
        service: web::Data<Arc<AnalyticsService>>,
    ) -> Result<HttpResponse, PrivalyticsError> {
        let devices = service.devices(&site.site_id).await?;
        Ok(HttpResponse::Ok().json(devices))
    }
}
