//! HTTP client for single-shot JSON requests.

use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::{FetchError, classify_status};

/// HTTP client wrapper used by release sources.
///
/// Requests are issued exactly once; callers decide whether to try again.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET request and deserializes the JSON response.
    ///
    /// Non-success statuses become [`FetchError::Status`] and bodies that do
    /// not deserialize into `T` become [`FetchError::Parse`].
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!("GET JSON from {}...", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = classify_status(status, &body);
            warn!("GET {} returned HTTP {}", url, status.as_u16());
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Parse(e.to_string()))
    }
}
