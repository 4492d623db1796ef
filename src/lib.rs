//! CEP Weather - zip code to current temperature lookup service
//!
//! This library resolves a Brazilian zip code (CEP) to the current temperature
//! at its city by chaining a geocode provider and a weather provider. It can be
//! served directly (backend mode) or behind a thin relay (edge mode).

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::config::{ServiceMode, Settings};
pub use crate::core::{is_valid_cep, LookupError, Temperatures, WeatherLookup, ZipCode};
pub use crate::models::{LookupResponse, WeatherRequest};
