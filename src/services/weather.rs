use crate::models::WeatherResult;
use crate::services::provider::{build_http_client, truncate_body, ProviderError, TransportOptions};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
}

/// Error envelope returned by the provider on 4xx, e.g. unknown location
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

/// Weather provider client: city name -> current temperature
///
/// Calls `GET <base_url>/current.json?key=<api key>&q=<city>`.
#[derive(Clone)]
pub struct WeatherClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        options: TransportOptions,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: build_http_client(options)?,
        })
    }

    /// Fetch the current Celsius temperature for a city
    ///
    /// There is no not-found outcome here: any non-success answer, including
    /// an unknown location, is reported as a provider failure.
    pub async fn current(&self, city: &str) -> Result<WeatherResult, ProviderError> {
        let url = format!("{}/current.json", self.base_url.trim_end_matches('/'));

        tracing::debug!("Fetching current weather for {} from {}", city, url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", city)])
            .send()
            .await
            .map_err(redact_url)?;

        let status = response.status();
        let body = response.text().await.map_err(redact_url)?;

        if !status.is_success() {
            let body = match serde_json::from_str::<ErrorPayload>(&body) {
                Ok(ErrorPayload { error: ErrorDetail { code: Some(code), message } }) => {
                    format!("{} (code {})", message, code)
                }
                Ok(ErrorPayload { error }) => error.message,
                Err(_) => truncate_body(&body),
            };
            return Err(ProviderError::UnexpectedStatus { status, body });
        }

        let payload: CurrentPayload = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse weather response: {}", e)))?;

        Ok(WeatherResult {
            temperature_celsius: payload.current.temp_c,
        })
    }
}

// The request URL carries the API key in its query string
fn redact_url(err: reqwest::Error) -> ProviderError {
    ProviderError::RequestError(err.without_url())
}
