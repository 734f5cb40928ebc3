//! Event evaluation against `POST /v1/evaluate`, with fail-open fallback.
//!
//! The hosted evaluator labels each payout event `allow`,
//! `hold-for-review` or `block`. It runs in shadow mode: the verdict is
//! advisory, and the caller's payout flow must continue even when RCL is
//! down. [`EvaluationClient::evaluate`] therefore never fails. Any
//! transport error, deadline expiry, non-2xx status or malformed body
//! yields a client-synthesized `allow` result with `fallback = true`.
//!
//! ## Deadline
//!
//! The request future races a `tokio::time::timeout`. When the timer wins
//! the request future is dropped, which aborts the in-flight HTTP call; a
//! response arriving afterwards is never observed.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RclApiError;
use crate::transport::Transport;

/// Default `event_type` for evaluation requests.
pub const DEFAULT_EVENT_TYPE: &str = "payout";
/// Default ISO 4217 currency.
pub const DEFAULT_CURRENCY: &str = "USD";
/// Default tenant policy variant.
pub const DEFAULT_SCENARIO: &str = "v1";

/// `reason` attached to client-synthesized results.
pub const FAIL_OPEN_REASON: &str = "RCL unavailable; fail-open allow";

const EVALUATE_ENDPOINT: &str = "POST /v1/evaluate";

/// Evaluator decision for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Allow,
    HoldForReview,
    Block,
}

impl Verdict {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::HoldForReview => "hold-for-review",
            Self::Block => "block",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(Self::Allow),
            "hold-for-review" => Ok(Self::HoldForReview),
            "block" => Ok(Self::Block),
            other => Err(format!(
                "unknown verdict '{other}' (expected allow, hold-for-review or block)"
            )),
        }
    }
}

/// Body of `POST /v1/evaluate`.
///
/// `event_id` is the caller's idempotency key. The server treats repeated
/// submissions of the same `(tenant, scenario, event_id)` as one logical
/// evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub event_id: String,
    /// Pseudonymous counterparty token. Never a name, email or account number.
    pub entity_id: String,
    pub amount: f64,
    pub event_type: String,
    pub currency: String,
    pub scenario: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl EvaluationRequest {
    /// Build a request with default type, currency and scenario, stamped now.
    pub fn new(event_id: impl Into<String>, entity_id: impl Into<String>, amount: f64) -> Self {
        Self {
            event_id: event_id.into(),
            entity_id: entity_id.into(),
            amount,
            event_type: DEFAULT_EVENT_TYPE.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            scenario: DEFAULT_SCENARIO.to_string(),
            tenant: None,
            timestamp: Utc::now(),
        }
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = scenario.into();
        self
    }

    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    /// Use the event's own time instead of the construction time.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Verdict for one event, either server-issued or synthesized on failure.
///
/// `fallback` and `error` belong to the client: they are cleared on every
/// server response and only set by [`EvaluationResult::fail_open`].
/// Server fields not modeled here are kept in `extra`, and absent fields
/// stay absent, so a successful response round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub event_id: String,
    pub verdict: Verdict,
    /// Outer `None`: the server omitted the key. `Some(None)`: explicit `null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub rule_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Kept as the server's string: the hosted service emits naive
    /// ISO-8601 timestamps without an offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Deserialize a field that is present, keeping `null` distinct from absence.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl EvaluationResult {
    /// Synthesize the fail-open result for an evaluation that could not complete.
    pub fn fail_open(event_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            verdict: Verdict::Allow,
            rule_id: Some(None),
            reason: Some(FAIL_OPEN_REASON.to_string()),
            evaluated_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            fallback: true,
            error: Some(error.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// Identifier of the rule that fired, if any.
    pub fn rule_id(&self) -> Option<&str> {
        self.rule_id.as_ref().and_then(|r| r.as_deref())
    }

    /// Human-readable reason, empty when the server sent none.
    pub fn reason(&self) -> &str {
        self.reason.as_deref().unwrap_or_default()
    }

    /// True when this result was synthesized by the client.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// True when the caller may proceed without review.
    pub fn is_allowed(&self) -> bool {
        self.verdict == Verdict::Allow
    }
}

/// Client for `POST /v1/evaluate`.
#[derive(Debug, Clone)]
pub struct EvaluationClient {
    transport: Transport,
}

impl EvaluationClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Evaluate an event, failing open.
    ///
    /// Returns the server's result unchanged on success. On any failure
    /// returns [`EvaluationResult::fail_open`] and logs a warning; this
    /// method has no error path.
    pub async fn evaluate(&self, req: &EvaluationRequest) -> EvaluationResult {
        match self.try_evaluate(req).await {
            Ok(result) => {
                tracing::debug!(
                    event_id = %req.event_id,
                    verdict = %result.verdict,
                    rule_id = result.rule_id().unwrap_or("-"),
                    "RCL verdict received"
                );
                result
            }
            Err(e) => {
                tracing::warn!(
                    event_id = %req.event_id,
                    failure = e.kind(),
                    "RCL fail-open, allowing event: {e}"
                );
                EvaluationResult::fail_open(req.event_id.clone(), e.to_string())
            }
        }
    }

    /// Evaluate an event, surfacing every failure.
    ///
    /// Sends exactly one request. The whole exchange, body read included,
    /// is bounded by the configured timeout.
    pub async fn try_evaluate(
        &self,
        req: &EvaluationRequest,
    ) -> Result<EvaluationResult, RclApiError> {
        let url = self.transport.url("v1/evaluate");
        let call = self.transport.json::<EvaluationResult>(
            EVALUATE_ENDPOINT,
            self.transport.http.post(&url).json(req),
        );

        let timeout_ms = self.transport.timeout_ms();
        let mut result = tokio::time::timeout(std::time::Duration::from_millis(timeout_ms), call)
            .await
            .map_err(|_| RclApiError::Timeout {
                endpoint: EVALUATE_ENDPOINT.into(),
                timeout_ms,
            })??;

        result.fallback = false;
        result.error = None;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn verdict_wire_strings() {
        assert_eq!(
            serde_json::to_value(Verdict::HoldForReview).unwrap(),
            serde_json::json!("hold-for-review")
        );
        assert_eq!("block".parse::<Verdict>().unwrap(), Verdict::Block);
        assert!("deny".parse::<Verdict>().is_err());
        assert_eq!(Verdict::Allow.to_string(), "allow");
    }

    #[test]
    fn request_defaults() {
        let before = Utc::now();
        let req = EvaluationRequest::new("test_001", "partner_alpha", 15000.0);
        let after = Utc::now();
        assert!(req.timestamp >= before && req.timestamp <= after);
        assert_eq!(req.event_type, "payout");
        assert_eq!(req.currency, "USD");
        assert_eq!(req.scenario, "v1");
        assert!(req.tenant.is_none());
    }

    #[test]
    fn request_wire_shape() {
        let ts = Utc.with_ymd_and_hms(2026, 2, 24, 10, 0, 0).unwrap();
        let req = EvaluationRequest::new("payout_20260224_001", "partner_abc123", 15000.0)
            .currency("EUR")
            .scenario("v2")
            .timestamp(ts);
        let body = serde_json::to_value(&req).unwrap();

        assert_eq!(body["event_id"], "payout_20260224_001");
        assert_eq!(body["entity_id"], "partner_abc123");
        assert_eq!(body["amount"], 15000.0);
        assert_eq!(body["event_type"], "payout");
        assert_eq!(body["currency"], "EUR");
        assert_eq!(body["scenario"], "v2");
        assert_eq!(body["timestamp"], "2026-02-24T10:00:00Z");
        assert!(body.get("tenant").is_none(), "unset tenant is omitted");
    }

    #[test]
    fn tenant_is_sent_when_set() {
        let req = EvaluationRequest::new("e", "p", 1.0).tenant("acme");
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["tenant"], "acme");
    }

    #[test]
    fn fail_open_result_allows() {
        let r = EvaluationResult::fail_open("evt_9", "connection refused");
        assert_eq!(r.verdict, Verdict::Allow);
        assert!(r.is_fallback());
        assert!(r.is_allowed());
        assert_eq!(r.event_id, "evt_9");
        assert_eq!(r.error.as_deref(), Some("connection refused"));
        assert_eq!(r.reason(), FAIL_OPEN_REASON);

        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["fallback"], true);
        assert_eq!(v["verdict"], "allow");
        assert!(v["rule_id"].is_null() && v.get("rule_id").is_some());
    }

    #[test]
    fn server_result_serializes_without_fallback_key() {
        let raw = serde_json::json!({
            "verdict": "block",
            "rule_id": "R-CEIL",
            "reason": "daily ceiling exceeded"
        });
        let r: EvaluationResult = serde_json::from_value(raw.clone()).unwrap();
        assert!(!r.is_fallback());
        assert_eq!(serde_json::to_value(&r).unwrap(), raw);
    }

    #[test]
    fn unknown_server_fields_are_preserved() {
        let raw = serde_json::json!({
            "event_id": "evt_1",
            "verdict": "hold-for-review",
            "rule_id": "R-VEL",
            "reason": "velocity",
            "evaluated_at": "2026-02-24T10:00:00.123456",
            "policy_version": 7
        });
        let r: EvaluationResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(r.extra["policy_version"], 7);
        assert_eq!(serde_json::to_value(&r).unwrap(), raw);
    }

    #[test]
    fn partial_server_result_round_trips() {
        let raw = serde_json::json!({"event_id": "test_001", "verdict": "allow"});
        let r: EvaluationResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(r.rule_id, None);
        assert_eq!(r.reason(), "");
        assert_eq!(serde_json::to_value(&r).unwrap(), raw);
    }

    #[test]
    fn null_rule_id_is_kept() {
        let raw = serde_json::json!({
            "verdict": "allow",
            "rule_id": null,
            "reason": "All rules passed"
        });
        let r: EvaluationResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(r.rule_id, Some(None));
        assert_eq!(r.rule_id(), None);
        assert_eq!(serde_json::to_value(&r).unwrap(), raw);
    }

    #[test]
    fn unknown_verdict_is_rejected() {
        let raw = serde_json::json!({"verdict": "maybe"});
        assert!(serde_json::from_value::<EvaluationResult>(raw).is_err());
    }
}
