// Route exports
pub mod relay;
pub mod weather;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};

use crate::core::LookupError;
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::RelayError;
use crate::config::ServiceMode;

pub use relay::RelayState;
pub use weather::AppState;

/// Routes served in backend mode; expects `web::Data<AppState>`
pub fn configure_backend(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(|| health_check(ServiceMode::Backend)))
        .configure(weather::configure);
}

/// Routes served in edge mode; expects `web::Data<RelayState>`
pub fn configure_edge(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(|| health_check(ServiceMode::Edge)))
        .configure(relay::configure);
}

/// JSON extractor config that answers malformed bodies with `400 {"error": ...}`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(format!("Invalid JSON: {}", err)));
    error::InternalError::from_response(err, response).into()
}

/// Health check endpoint
async fn health_check(mode: ServiceMode) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        mode: mode.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

impl ResponseError for LookupError {
    fn status_code(&self) -> StatusCode {
        match self {
            LookupError::InvalidFormat => StatusCode::UNPROCESSABLE_ENTITY,
            LookupError::NotFound => StatusCode::NOT_FOUND,
            LookupError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}
