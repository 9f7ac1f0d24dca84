use actix_web::{HttpResponse, error::InternalError, web};
use tracing::debug;

use crate::errors::ErrorBody;

/// JSON extractor config: malformed bodies become `400 {"error": ...}`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, req| {
            let message = err.to_string();
            debug!("Rejected body on {}: {}", req.path(), message);
            let response = HttpResponse::BadRequest().json(ErrorBody { error: &message });
            InternalError::from_response(err, response).into()
        })
}
