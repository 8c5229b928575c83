//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use super::types::PlaceQueryError;

/// Default request timeout, above the 25 s the Overpass server may spend.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Async HTTP GET.
///
/// This abstraction allows mock clients to stand in for the network in
/// tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the body.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, PlaceQueryError>> + Send;
}

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a client with the default timeout.
    pub fn new() -> Result<Self, PlaceQueryError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with a custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, PlaceQueryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("solotrav/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                PlaceQueryError::Network(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, PlaceQueryError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PlaceQueryError::Network(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PlaceQueryError::Network(format!(
                "HTTP {} from {}",
                response.status(),
                response.url().host_str().unwrap_or("server")
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| PlaceQueryError::Network(format!("Failed to read response: {}", e)))
    }
}
