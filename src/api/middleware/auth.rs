use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, error, trace};

use crate::errors::PrivalyticsError;
use crate::services::SiteService;

/// Header carrying a site's API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// 认证通过的站点，由中间件写入请求扩展
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedSite {
    pub site_id: String,
}

impl FromRequest for AuthenticatedSite {
    type Error = PrivalyticsError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedSite>()
                .cloned()
                .ok_or_else(|| PrivalyticsError::unauthorized("API key required")),
        )
    }
}

/// API key authentication middleware
///
/// Requires a `SiteService` in app data.
#[derive(Clone)]
pub struct ApiKeyAuth;

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn reject(req: ServiceRequest, err: PrivalyticsError) -> ServiceResponse<EitherBody<B>> {
        req.into_response(err.error_response().map_into_right_body())
    }

    /// A header that is absent or empty counts as missing; one that is
    /// present but not visible ASCII can never match a key.
    fn extract_api_key(req: &ServiceRequest) -> Result<String, PrivalyticsError> {
        let Some(value) = req.headers().get(API_KEY_HEADER) else {
            return Err(PrivalyticsError::unauthorized("API key required"));
        };
        if value.is_empty() {
            return Err(PrivalyticsError::unauthorized("API key required"));
        }
        value
            .to_str()
            .map(|s| s.to_string())
            .map_err(|_| PrivalyticsError::unauthorized("Invalid API key"))
    }
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            let api_key = match Self::extract_api_key(&req) {
                Ok(key) => key,
                Err(e) => {
                    debug!("Request to {} rejected: {}", req.path(), e.message());
                    return Ok(Self::reject(req, e));
                }
            };

            let Some(sites) = req.app_data::<web::Data<Arc<SiteService>>>().cloned() else {
                error!("SiteService not registered in app data");
                return Ok(Self::reject(
                    req,
                    PrivalyticsError::database_config("Site lookup unavailable"),
                ));
            };

            match sites.authenticate(&api_key).await {
                Ok(site) => {
                    trace!("API key accepted for site {}", site.id);
                    req.extensions_mut()
                        .insert(AuthenticatedSite { site_id: site.id });
                    let response = srv.call(req).await?.map_into_left_body();
                    Ok(response)
                }
                Err(e) => Ok(Self::reject(req, e)),
            }
        })
    }
}
