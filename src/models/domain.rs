use serde::{Deserialize, Serialize};
use std::fmt;

/// City resolved by the geocode provider for a zip code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub city_name: String,
}

/// Current conditions returned by the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub temperature_celsius: f64,
}

/// Identity of an upstream provider, carried by upstream failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Geocode,
    Weather,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Geocode => "geocode",
            Provider::Weather => "weather",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
