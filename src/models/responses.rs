use serde::{Deserialize, Serialize};

use crate::core::conversion::Temperatures;
use crate::models::domain::{GeocodeResult, WeatherResult};

/// Successful lookup: the temperature in three units and the resolved city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(rename = "temp_C")]
    pub temperature_celsius: f64,
    #[serde(rename = "temp_F")]
    pub temperature_fahrenheit: f64,
    #[serde(rename = "temp_K")]
    pub temperature_kelvin: f64,
    #[serde(rename = "city")]
    pub city_name: String,
}

impl LookupResponse {
    /// Assemble the response; Fahrenheit and Kelvin are always derived
    pub fn from_parts(geocode: GeocodeResult, weather: WeatherResult) -> Self {
        let temps = Temperatures::from_celsius(weather.temperature_celsius);
        Self {
            temperature_celsius: temps.celsius,
            temperature_fahrenheit: temps.fahrenheit,
            temperature_kelvin: temps.kelvin,
            city_name: geocode.city_name,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
