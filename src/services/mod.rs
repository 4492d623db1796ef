// Service exports
pub mod geocode;
pub mod provider;
pub mod relay;
pub mod weather;

pub use geocode::GeocodeClient;
pub use provider::{build_http_client, ProviderError, TransportOptions};
pub use relay::{BackendClient, RelayError, RelayedResponse};
pub use weather::WeatherClient;
