use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use cep_weather::config::{ServiceMode, Settings};
use cep_weather::core::WeatherLookup;
use cep_weather::routes::{self, AppState, RelayState};
use cep_weather::services::BackendClient;
use std::io;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    init_tracing();

    info!("Starting CEP weather service...");

    let settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, format!("Configuration error: {}", e))
    })?;

    info!("Configuration loaded: {:?}", settings);

    match settings.mode {
        ServiceMode::Backend => run_backend(settings).await,
        ServiceMode::Edge => run_edge(settings).await,
    }
}

/// Initialize logging from `LOG_LEVEL` (filter directive) and `LOG_FORMAT`
fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match log_format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

async fn run_backend(settings: Settings) -> io::Result<()> {
    if settings.weather.api_key.is_empty() {
        warn!("No weather API key configured; weather provider calls will be rejected");
    }

    let lookup = WeatherLookup::from_settings(&settings).map_err(|e| {
        error!("Failed to build provider clients: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;

    info!(
        "Lookup pipeline ready (geocode: {}, weather: {})",
        settings.geocode.base_url, settings.weather.base_url
    );

    let state = AppState::new(lookup);
    let (host, port, workers) = bind_params(&settings);

    info!("Starting backend HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(routes::json_config())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_backend)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

async fn run_edge(settings: Settings) -> io::Result<()> {
    let backend = BackendClient::new(&settings.relay.backend_url, settings.relay.transport()).map_err(|e| {
        error!("Failed to build backend client: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;

    info!("Relaying lookups to {}", settings.relay.backend_url);

    let state = RelayState::new(backend);
    let (host, port, workers) = bind_params(&settings);

    info!("Starting edge HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(routes::json_config())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_edge)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

fn bind_params(settings: &Settings) -> (String, u16, usize) {
    let workers = settings.server.workers.unwrap_or(4);
    (settings.server.host.clone(), settings.server.port, workers)
}
