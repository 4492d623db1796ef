use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::services::TransportOptions;

/// Prefix for environment overrides, e.g. `CEP_WEATHER__SERVER__PORT`
pub const ENV_PREFIX: &str = "CEP_WEATHER";

/// Plain environment variable holding the weather provider key
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub mode: ServiceMode,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub geocode: GeocodeSettings,
    #[serde(default)]
    pub weather: WeatherSettings,
    #[serde(default)]
    pub relay: RelaySettings,
}

/// Which half of the deployment this process runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    /// Performs the geocode and weather lookups
    #[default]
    Backend,
    /// Validates and forwards requests to a backend
    Edge,
}

impl ServiceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMode::Backend => "backend",
            ServiceMode::Edge => "edge",
        }
    }
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeSettings {
    #[serde(default = "default_geocode_url")]
    pub base_url: String,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for GeocodeSettings {
    fn default() -> Self {
        Self {
            base_url: default_geocode_url(),
            timeout_secs: None,
            accept_invalid_certs: false,
        }
    }
}

impl GeocodeSettings {
    pub fn transport(&self) -> TransportOptions {
        TransportOptions::new(self.timeout_secs, self.accept_invalid_certs)
    }
}

#[derive(Clone, Deserialize)]
pub struct WeatherSettings {
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            api_key: String::new(),
            timeout_secs: None,
            accept_invalid_certs: false,
        }
    }
}

impl WeatherSettings {
    pub fn transport(&self) -> TransportOptions {
        TransportOptions::new(self.timeout_secs, self.accept_invalid_certs)
    }
}

// Keep the API key out of logs
impl fmt::Debug for WeatherSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("timeout_secs", &self.timeout_secs)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelaySettings {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    pub timeout_secs: Option<u64>,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            timeout_secs: None,
        }
    }
}

impl RelaySettings {
    pub fn transport(&self) -> TransportOptions {
        TransportOptions::new(self.timeout_secs, false)
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_geocode_url() -> String { "https://opencep.com/v1".to_string() }
fn default_weather_url() -> String { "https://api.weatherapi.com/v1".to_string() }
fn default_backend_url() -> String { "http://localhost:8081".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CEP_WEATHER)
    /// 5. `WEATHER_API_KEY`, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(env_source())
            .build()?;

        let settings = apply_api_key_override(settings, std::env::var(WEATHER_API_KEY_VAR).ok())?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path, with the same environment overrides as [`Settings::load`]
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load_from_with_key(path, std::env::var(WEATHER_API_KEY_VAR).ok())
    }

    fn load_from_with_key<P: AsRef<Path>>(path: P, api_key: Option<String>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        apply_api_key_override(settings, api_key)?.try_deserialize()
    }
}

fn env_source() -> Environment {
    // e.g., CEP_WEATHER__SERVER__PORT -> server.port
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn apply_api_key_override(settings: Config, api_key: Option<String>) -> Result<Config, ConfigError> {
    match api_key.filter(|key| !key.is_empty()) {
        Some(key) => Config::builder()
            .add_source(settings)
            .set_override("weather.api_key", key)?
            .build(),
        None => Ok(settings),
    }
}
