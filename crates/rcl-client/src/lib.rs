//! # rcl-client -- Typed Rust client for the Froddy RCL API
//!
//! RCL (Risk Control Layer) is a hosted shadow-mode evaluator for
//! automated payouts. It labels each event `allow`, `hold-for-review` or
//! `block` and keeps an auditable decision log. This crate consumes its
//! HTTP API:
//!
//! - **Evaluation** via `POST /v1/evaluate`, fail-open
//! - **Health** via `GET /health`
//! - **Policy / rules** via `/v1/policy`, `/v1/rules`
//! - **Decision log** via `/v1/decisions`, `/v1/decisions/export`, `/v1/stats`
//! - **Webhook** via `/v1/webhook`
//! - **Reports** via `/v1/report`, `/v1/sensitivity`
//!
//! ## Fail-open
//!
//! [`RclClient::evaluate`] cannot fail. When RCL is unreachable, slow,
//! returns a non-2xx status or an unreadable body, the call resolves to
//! `verdict = allow` with `fallback = true` and a diagnostic `error`. A
//! down evaluator must never stall the caller's payout flow. Every other
//! operation, health included, returns [`RclApiError`].
//!
//! ```no_run
//! # async fn run() -> Result<(), rcl_client::RclApiError> {
//! use rcl_client::{RclClient, RclConfig};
//!
//! let client = RclClient::new(RclConfig::from_env()?)?;
//! let result = client.evaluate("payout_20260224_001", "partner_abc123", 15000.0).await;
//! if !result.is_allowed() {
//!     println!("{} {:?}: {}", result.verdict, result.rule_id(), result.reason());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod decisions;
pub mod error;
pub mod evaluation;
pub mod health;
pub mod policy;
pub mod reports;
pub(crate) mod transport;
pub mod webhook;

pub use config::{ConfigError, RclConfig};
pub use error::RclApiError;
pub use evaluation::{EvaluationRequest, EvaluationResult, Verdict};
pub use health::HealthStatus;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use transport::Transport;

/// Header carrying the tenant API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Top-level RCL API client. Holds sub-clients for each endpoint group.
///
/// Cheap to clone; clones share one connection pool. Holds no state
/// beyond its configuration, so concurrent calls need no coordination.
#[derive(Debug, Clone)]
pub struct RclClient {
    transport: Transport,
    evaluation: evaluation::EvaluationClient,
    policy: policy::PolicyClient,
    decisions: decisions::DecisionsClient,
    webhook: webhook::WebhookClient,
    reports: reports::ReportsClient,
}

impl RclClient {
    /// Create a new RCL API client from configuration.
    pub fn new(config: RclConfig) -> Result<Self, RclApiError> {
        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            let mut value = HeaderValue::from_str(config.api_key.as_str())
                .map_err(|_| RclApiError::Config(ConfigError::InvalidApiKey))?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| RclApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let transport = Transport::new(http, config.base_url, config.timeout_ms);
        Ok(Self {
            evaluation: evaluation::EvaluationClient::new(transport.clone()),
            policy: policy::PolicyClient::new(transport.clone()),
            decisions: decisions::DecisionsClient::new(transport.clone()),
            webhook: webhook::WebhookClient::new(transport.clone()),
            reports: reports::ReportsClient::new(transport.clone()),
            transport,
        })
    }

    /// Evaluate a payout event with default type, currency and scenario.
    ///
    /// Fail-open: never errors. See [`evaluation::EvaluationClient::evaluate`].
    pub async fn evaluate(
        &self,
        event_id: impl Into<String>,
        entity_id: impl Into<String>,
        amount: f64,
    ) -> EvaluationResult {
        let req = EvaluationRequest::new(event_id, entity_id, amount);
        self.evaluation.evaluate(&req).await
    }

    /// Evaluate a fully built request. Fail-open: never errors.
    pub async fn evaluate_request(&self, req: &EvaluationRequest) -> EvaluationResult {
        self.evaluation.evaluate(req).await
    }

    /// Evaluate a request, returning failures instead of falling back.
    pub async fn try_evaluate(
        &self,
        req: &EvaluationRequest,
    ) -> Result<EvaluationResult, RclApiError> {
        self.evaluation.try_evaluate(req).await
    }

    /// Check service health. Errors propagate; there is no fallback.
    pub async fn health(&self) -> Result<HealthStatus, RclApiError> {
        let url = self.transport.url("health");
        self.transport
            .json("GET /health", self.transport.http.get(&url))
            .await
    }

    /// Access the policy and rules client.
    pub fn policy(&self) -> &policy::PolicyClient {
        &self.policy
    }

    /// Access the decision log client.
    pub fn decisions(&self) -> &decisions::DecisionsClient {
        &self.decisions
    }

    /// Access the webhook configuration client.
    pub fn webhook(&self) -> &webhook::WebhookClient {
        &self.webhook
    }

    /// Access the reporting client.
    pub fn reports(&self) -> &reports::ReportsClient {
        &self.reports
    }
}
