use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::zipcode::is_valid_cep;

/// Inbound body of `POST /weather`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WeatherRequest {
    #[validate(custom(function = "validate_cep"))]
    pub cep: String,
}

impl WeatherRequest {
    pub fn new(cep: impl Into<String>) -> Self {
        Self { cep: cep.into() }
    }
}

fn validate_cep(cep: &str) -> Result<(), ValidationError> {
    if is_valid_cep(cep) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_cep"))
    }
}
