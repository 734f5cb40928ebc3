//! Pilot reporting and what-if threshold analysis.
//!
//! Both responses are free-form documents assembled by the service, so
//! they are returned as raw JSON.

use serde::Serialize;

use crate::error::RclApiError;
use crate::policy::Thresholds;
use crate::transport::Transport;

/// Body of `POST /v1/sensitivity`: replay logged events against
/// candidate thresholds without changing the live policy.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SensitivityRequest {
    pub policy: Thresholds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// Number of most recent decisions to replay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Client for `/v1/report` and `/v1/sensitivity`.
#[derive(Debug, Clone)]
pub struct ReportsClient {
    transport: Transport,
}

impl ReportsClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Pilot summary for the tenant.
    pub async fn pilot(&self) -> Result<serde_json::Value, RclApiError> {
        let url = self.transport.url("v1/report");
        self.transport
            .json("GET /v1/report", self.transport.http.get(&url))
            .await
    }

    /// Run a what-if analysis for candidate thresholds.
    pub async fn sensitivity(
        &self,
        req: &SensitivityRequest,
    ) -> Result<serde_json::Value, RclApiError> {
        let url = self.transport.url("v1/sensitivity");
        self.transport
            .json("POST /v1/sensitivity", self.transport.http.post(&url).json(req))
            .await
    }
}
