use actix_web::{http::StatusCode, web, HttpResponse};
use std::sync::Arc;
use validator::Validate;

use crate::core::LookupError;
use crate::models::WeatherRequest;
use crate::services::BackendClient;

/// State for the edge service
#[derive(Clone)]
pub struct RelayState {
    pub backend: Arc<BackendClient>,
}

impl RelayState {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend: Arc::new(backend) }
    }
}

/// Configure the relayed lookup route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/weather", web::post().to(relay_weather));
}

/// Edge lookup endpoint
///
/// POST /weather
///
/// Rejects malformed zip codes locally with `422`; everything else is
/// forwarded to the backend and its status and body are returned unchanged.
async fn relay_weather(
    state: web::Data<RelayState>,
    req: web::Json<WeatherRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    if let Err(errors) = req.validate() {
        tracing::info!("Rejected request at edge: cep={:?}, errors={}", req.cep, errors);
        return Err(LookupError::InvalidFormat.into());
    }

    let relayed = state.backend.forward(&req).await.map_err(|e| {
        tracing::error!("Failed to reach backend for {}: {}", req.cep, e);
        e
    })?;

    let status = StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = HttpResponse::build(status);
    if let Some(content_type) = relayed.content_type {
        response.content_type(content_type);
    }

    Ok(response.body(relayed.body))
}
