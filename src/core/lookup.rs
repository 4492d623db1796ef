use crate::config::Settings;
use crate::core::zipcode::ZipCode;
use crate::models::{GeocodeResult, LookupResponse, Provider, WeatherResult};
use crate::services::{GeocodeClient, ProviderError, WeatherClient};
use thiserror::Error;

/// Failure kinds surfaced by a lookup
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid Zip Code")]
    InvalidFormat,

    #[error("can not find zipcode")]
    NotFound,

    #[error("{provider} provider failure: {source}")]
    Upstream {
        provider: Provider,
        #[source]
        source: ProviderError,
    },
}

impl LookupError {
    /// Provider that caused an upstream failure, if any
    pub fn provider(&self) -> Option<Provider> {
        match self {
            LookupError::Upstream { provider, .. } => Some(*provider),
            _ => None,
        }
    }
}

/// Weather lookup orchestrator
///
/// # Pipeline Stages
/// 1. Zip code validation (no network)
/// 2. Geocode: zip code -> city
/// 3. Weather: city -> Celsius
/// 4. Unit conversion and response assembly
///
/// Each stage consumes the previous stage's output, so the two provider calls
/// are strictly sequential. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    geocoder: GeocodeClient,
    weather: WeatherClient,
}

impl WeatherLookup {
    pub fn new(geocoder: GeocodeClient, weather: WeatherClient) -> Self {
        Self { geocoder, weather }
    }

    /// Build both provider clients from configuration
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        let geocoder = GeocodeClient::new(&settings.geocode.base_url, settings.geocode.transport())?;
        let weather = WeatherClient::new(
            &settings.weather.base_url,
            &settings.weather.api_key,
            settings.weather.transport(),
        )?;

        Ok(Self::new(geocoder, weather))
    }

    /// Resolve a raw zip code to the current temperature at its city
    pub async fn lookup(&self, raw_zip: &str) -> Result<LookupResponse, LookupError> {
        let zip = validate(raw_zip)?;
        let geocode = self.geocode(&zip).await?;
        let weather = self.current_weather(&geocode).await?;

        let response = LookupResponse::from_parts(geocode, weather);

        tracing::info!(
            "Lookup for {} resolved to {} at {:.1}°C",
            zip,
            response.city_name,
            response.temperature_celsius
        );

        Ok(response)
    }

    async fn geocode(&self, zip: &ZipCode) -> Result<GeocodeResult, LookupError> {
        self.geocoder.resolve(zip).await.map_err(|e| match e {
            ProviderError::NotFound(reason) => {
                tracing::info!("Zip code {} not found: {}", zip, reason);
                LookupError::NotFound
            }
            source => {
                tracing::error!("Geocode lookup failed for {}: {}", zip, source);
                LookupError::Upstream {
                    provider: Provider::Geocode,
                    source,
                }
            }
        })
    }

    async fn current_weather(&self, geocode: &GeocodeResult) -> Result<WeatherResult, LookupError> {
        self.weather.current(&geocode.city_name).await.map_err(|source| {
            tracing::error!("Weather lookup failed for {}: {}", geocode.city_name, source);
            LookupError::Upstream {
                provider: Provider::Weather,
                source,
            }
        })
    }
}

fn validate(raw_zip: &str) -> Result<ZipCode, LookupError> {
    ZipCode::parse(raw_zip).ok_or_else(|| {
        tracing::debug!("Rejected malformed zip code: {:?}", raw_zip);
        LookupError::InvalidFormat
    })
}
