use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::errors::PrivalyticsError;
use crate::services::{RegisterSiteRequest, SiteService};

pub struct SiteHandlers;

impl SiteHandlers {
    /// POST /api/sites
    pub async fn register(
        service: web::Data<Arc<SiteService>>,
        body: web::Json<RegisterSiteRequest>,
    ) -> Result<HttpResponse, PrivalyticsError> {
        let site = service.register(body.into_inner()).await?;
        Ok(HttpResponse::Created().json(site))
    }
}
