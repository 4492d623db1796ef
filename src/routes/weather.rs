use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::{LookupError, WeatherLookup};
use crate::models::WeatherRequest;

/// Application state shared across backend handlers
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<WeatherLookup>,
}

impl AppState {
    pub fn new(lookup: WeatherLookup) -> Self {
        Self { lookup: Arc::new(lookup) }
    }
}

/// Configure the lookup route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/weather", web::post().to(lookup_weather));
}

/// Weather lookup endpoint
///
/// POST /weather
///
/// Request body:
/// ```json
/// { "cep": "01001000" }
/// ```
///
/// Responds `200` with temperatures and city, `422` for a malformed zip code,
/// `404` when the zip code is unknown and `500` on provider failures.
async fn lookup_weather(
    state: web::Data<AppState>,
    req: web::Json<WeatherRequest>,
) -> Result<HttpResponse, LookupError> {
    let response = state.lookup.lookup(&req.cep).await?;
    Ok(HttpResponse::Ok().json(response))
}
