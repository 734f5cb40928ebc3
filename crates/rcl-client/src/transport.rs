//! Shared request plumbing for the RCL sub-clients.
//!
//! Every sub-client holds a clone of [`Transport`]: one pooled
//! `reqwest::Client` (API key baked into its default headers), the base
//! URL, and the configured timeout used when reporting deadline errors.
//! Non-2xx statuses become [`RclApiError::ApiError`] with the body text;
//! bodies are decoded with `serde_json` so parse failures keep their
//! position information.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::RclApiError;

#[derive(Debug, Clone)]
pub(crate) struct Transport {
    pub(crate) http: reqwest::Client,
    base_url: Url,
    timeout_ms: u64,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client, base_url: Url, timeout_ms: u64) -> Self {
        Self {
            http,
            base_url,
            timeout_ms,
        }
    }

    pub(crate) fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Join an endpoint path onto the base URL, tolerating a base URL
    /// with or without a trailing slash or a path prefix.
    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Send a request and reject non-2xx responses.
    pub(crate) async fn execute(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, RclApiError> {
        let resp = request
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(RclApiError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        Ok(resp)
    }

    /// Send a request and decode a 2xx JSON body.
    pub(crate) async fn json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RclApiError> {
        let resp = self.execute(endpoint, request).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;
        serde_json::from_slice(&bytes).map_err(|e| RclApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    /// Send a request and return the 2xx body as text.
    pub(crate) async fn text(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<String, RclApiError> {
        let resp = self.execute(endpoint, request).await?;
        resp.text()
            .await
            .map_err(|e| self.transport_error(endpoint, e))
    }

    fn transport_error(&self, endpoint: &str, e: reqwest::Error) -> RclApiError {
        if e.is_timeout() {
            RclApiError::Timeout {
                endpoint: endpoint.into(),
                timeout_ms: self.timeout_ms,
            }
        } else {
            RclApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            }
        }
    }
}
