//! Typed client for alert webhook configuration at `/v1/webhook`.
//!
//! The service owns delivery; this client only reads, replaces and
//! removes the tenant's webhook target.

use serde::{Deserialize, Serialize};

use crate::error::RclApiError;
use crate::transport::Transport;

/// Alert webhook target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: String,
    /// Verdicts or event kinds that trigger a delivery. Empty means the
    /// service default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            events: Vec::new(),
            enabled: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Client for `/v1/webhook`.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    transport: Transport,
}

impl WebhookClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Current webhook, or `None` when none is configured (404).
    pub async fn get(&self) -> Result<Option<WebhookConfig>, RclApiError> {
        let url = self.transport.url("v1/webhook");
        match self
            .transport
            .json::<WebhookConfig>("GET /v1/webhook", self.transport.http.get(&url))
            .await
        {
            Ok(config) => Ok(Some(config)),
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Replace the webhook target.
    pub async fn put(&self, config: &WebhookConfig) -> Result<WebhookConfig, RclApiError> {
        let url = self.transport.url("v1/webhook");
        self.transport
            .json("PUT /v1/webhook", self.transport.http.put(&url).json(config))
            .await
    }

    /// Remove the webhook target. Removing an absent webhook succeeds.
    pub async fn delete(&self) -> Result<(), RclApiError> {
        let url = self.transport.url("v1/webhook");
        match self
            .transport
            .execute("DELETE /v1/webhook", self.transport.http.delete(&url))
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.status() == Some(404) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_serializes_url_only() {
        let v = serde_json::to_value(WebhookConfig::new("https://ops.example.com/rcl")).unwrap();
        assert_eq!(v, serde_json::json!({"url": "https://ops.example.com/rcl"}));
    }
}
