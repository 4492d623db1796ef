// Core lookup exports
pub mod conversion;
pub mod lookup;
pub mod zipcode;

pub use conversion::{celsius_to_fahrenheit, celsius_to_kelvin, Temperatures};
pub use lookup::{LookupError, WeatherLookup};
pub use zipcode::{is_valid_cep, ZipCode};
