use actix_web::{HttpRequest, HttpResponse, http::header::USER_AGENT, web};
use chrono::Utc;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::PrivalyticsError;
use crate::services::{TrackRequest, TrackingService};
use crate::utils::extract_client_ip;

pub struct TrackHandlers;

impl TrackHandlers {
    /// POST /api/track
    pub async fn track(
        req: HttpRequest,
        service: web::Data<Arc<TrackingService>>,
        config: web::Data<AppConfig>,
        body: web::Json<TrackRequest>,
    ) -> Result<HttpResponse, PrivalyticsError> {
        let client_ip = extract_client_ip(&req, &config.server.trusted_proxies);
        let user_agent = req.headers().get(USER_AGENT).and_then(|h| h.to_str().ok());

        service
            .track(body.into_inner(), &client_ip, user_agent, Utc::now())
            .await?;

        Ok(HttpResponse::NoContent().finish())
    }
}
