use crate::core::zipcode::ZipCode;
use crate::models::GeocodeResult;
use crate::services::provider::{build_http_client, truncate_body, ProviderError, TransportOptions};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

/// Raw geocode payload
///
/// Providers disagree on the city field name (`localidade` vs `city`) and
/// report unknown codes either with a 404 or with an `erro` flag in a 200 body.
#[derive(Debug, Deserialize)]
struct GeocodePayload {
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    erro: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

impl GeocodePayload {
    /// First non-null flag, `erro` before `error`
    fn flag(&self) -> Option<&Value> {
        [&self.erro, &self.error]
            .into_iter()
            .flatten()
            .find(|value| !value.is_null())
    }

    fn signals_not_found(&self) -> bool {
        match self.flag() {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(s)) => !s.is_empty() && !s.eq_ignore_ascii_case("false"),
            Some(Value::Number(n)) => n.as_f64().map_or(true, |n| n != 0.0),
            Some(Value::Array(_) | Value::Object(_)) => true,
        }
    }

    /// First non-blank city name, `localidade` before `city`
    fn into_city(self) -> Option<String> {
        [self.localidade, self.city]
            .into_iter()
            .flatten()
            .find(|city| !city.trim().is_empty())
    }
}

/// Geocode provider client: zip code -> city name
///
/// Calls `GET <base_url>/<zip code>`.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    base_url: String,
    client: Client,
}

impl GeocodeClient {
    pub fn new(base_url: impl Into<String>, options: TransportOptions) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_http_client(options)?,
        })
    }

    /// Resolve a validated zip code to its city
    ///
    /// Returns [`ProviderError::NotFound`] when the provider answers 404 or
    /// flags the code as unknown in its payload.
    pub async fn resolve(&self, zip: &ZipCode) -> Result<GeocodeResult, ProviderError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(zip.as_str())
        );

        tracing::debug!("Resolving zip code via: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(format!("zip code {} not found", zip)));
        }

        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status,
                body: truncate_body(&body),
            });
        }

        let payload: GeocodePayload = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse geocode response: {}", e)))?;

        if payload.signals_not_found() {
            return Err(ProviderError::NotFound(format!("zip code {} flagged as unknown", zip)));
        }

        let city_name = payload
            .into_city()
            .ok_or_else(|| ProviderError::InvalidResponse("Missing city in geocode response".into()))?;

        tracing::debug!("Zip code {} resolved to {}", zip, city_name);

        Ok(GeocodeResult { city_name })
    }
}
