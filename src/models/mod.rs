// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{GeocodeResult, Provider, WeatherResult};
pub use requests::WeatherRequest;
pub use responses::{ErrorResponse, HealthResponse, LookupResponse};
