use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("cep-weather/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an upstream body kept in error messages
const MAX_BODY_IN_ERROR: usize = 200;

/// Errors that can occur when calling an upstream provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Transport options shared by every outbound client
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportOptions {
    /// `None` keeps the transport default (no overall timeout)
    pub timeout: Option<Duration>,
    pub accept_invalid_certs: bool,
}

impl TransportOptions {
    pub fn new(timeout_secs: Option<u64>, accept_invalid_certs: bool) -> Self {
        Self {
            timeout: timeout_secs.map(Duration::from_secs),
            accept_invalid_certs,
        }
    }
}

/// Build a pooled HTTP client for one upstream
pub fn build_http_client(options: TransportOptions) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(USER_AGENT);

    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }

    if options.accept_invalid_certs {
        tracing::warn!("TLS certificate validation disabled for an upstream client");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build()
}

/// Trim an upstream body so it can be embedded in an error message
pub(crate) fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_IN_ERROR) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
