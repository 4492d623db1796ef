use crate::models::WeatherRequest;
use crate::services::provider::{build_http_client, TransportOptions};
use reqwest::Client;
use thiserror::Error;

/// Errors that can occur when forwarding to the backend service
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Backend request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

/// Backend answer, kept as-is so the edge can relay it verbatim
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Client used by the edge service to reach the backend `/weather` endpoint
#[derive(Debug, Clone)]
pub struct BackendClient {
    backend_url: String,
    client: Client,
}

impl BackendClient {
    pub fn new(backend_url: impl Into<String>, options: TransportOptions) -> Result<Self, RelayError> {
        Ok(Self {
            backend_url: backend_url.into(),
            client: build_http_client(options)?,
        })
    }

    /// Re-serialize the request to the backend and capture its response
    ///
    /// Any HTTP status is a successful relay; only transport failures are errors.
    pub async fn forward(&self, request: &WeatherRequest) -> Result<RelayedResponse, RelayError> {
        let url = format!("{}/weather", self.backend_url.trim_end_matches('/'));

        tracing::debug!("Relaying lookup for {} to {}", request.cep, url);

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        tracing::debug!("Backend answered {} for {}", status, request.cep);

        Ok(RelayedResponse {
            status,
            content_type,
            body,
        })
    }
}
