//! Typed client for the decision log.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/v1/decisions` | Query recent decisions |
//! | GET    | `/v1/decisions/export` | Export as CSV or JSON |
//! | GET    | `/v1/stats` | Aggregate verdict counts |

use serde::{Deserialize, Serialize};

use crate::error::RclApiError;
use crate::evaluation::Verdict;
use crate::transport::Transport;

/// Largest page the service returns for one query.
pub const MAX_DECISIONS_LIMIT: u32 = 1000;

/// One logged evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub evaluated_at: Option<String>,
    #[serde(default)]
    pub tenant: Option<String>,
    #[serde(default)]
    pub scenario: Option<String>,
    pub entity_id: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    pub verdict: Verdict,
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A page of the decision log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionPage {
    #[serde(default)]
    pub decisions: Vec<DecisionRecord>,
    #[serde(default)]
    pub count: usize,
}

/// Filters for `GET /v1/decisions`. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecisionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

/// Export encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// Parameters for `GET /v1/decisions/export`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportQuery {
    pub format: ExportFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

/// Aggregate verdict counts from `GET /v1/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub allow_count: u64,
    #[serde(default)]
    pub hold_count: u64,
    #[serde(default)]
    pub block_count: u64,
    /// Sum of amounts that would have been blocked outside shadow mode.
    #[serde(default)]
    pub blocked_amount: f64,
}

#[derive(Serialize)]
struct StatsQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<&'a str>,
}

/// Client for the decision log endpoints.
#[derive(Debug, Clone)]
pub struct DecisionsClient {
    transport: Transport,
}

impl DecisionsClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Query the decision log, newest first.
    ///
    /// A `limit` above [`MAX_DECISIONS_LIMIT`] is clamped before sending;
    /// the service would reject it.
    pub async fn list(&self, query: &DecisionQuery) -> Result<DecisionPage, RclApiError> {
        let mut query = query.clone();
        query.limit = query.limit.map(|l| l.min(MAX_DECISIONS_LIMIT));

        let url = self.transport.url("v1/decisions");
        self.transport
            .json("GET /v1/decisions", self.transport.http.get(&url).query(&query))
            .await
    }

    /// Export the decision log. Returns the body verbatim (CSV text or a
    /// JSON document, depending on `format`).
    pub async fn export(&self, query: &ExportQuery) -> Result<String, RclApiError> {
        let url = self.transport.url("v1/decisions/export");
        self.transport
            .text(
                "GET /v1/decisions/export",
                self.transport.http.get(&url).query(query),
            )
            .await
    }

    /// Aggregate verdict counts, optionally narrowed to a tenant/scenario.
    pub async fn stats(
        &self,
        tenant: Option<&str>,
        scenario: Option<&str>,
    ) -> Result<DecisionStats, RclApiError> {
        let url = self.transport.url("v1/stats");
        self.transport
            .json(
                "GET /v1/stats",
                self.transport
                    .http
                    .get(&url)
                    .query(&StatsQuery { tenant, scenario }),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_parses_log_row() {
        let rec: DecisionRecord = serde_json::from_value(serde_json::json!({
            "id": 42,
            "evaluated_at": "2026-02-24T10:00:00",
            "tenant": "demo",
            "scenario": "v1",
            "entity_id": "partner_alpha",
            "amount": 15000,
            "verdict": "hold-for-review",
            "rule_id": "R-COHORT",
            "reason": "new entity above hold threshold"
        }))
        .unwrap();
        assert_eq!(rec.id, Some(42));
        assert_eq!(rec.verdict, Verdict::HoldForReview);
        assert_eq!(rec.amount, 15000.0);
    }

    #[test]
    fn stats_default_to_zero() {
        let stats: DecisionStats = serde_json::from_value(serde_json::json!({"total": 3})).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.block_count, 0);
        assert_eq!(stats.blocked_amount, 0.0);
    }

    #[test]
    fn export_format_defaults_to_csv() {
        assert_eq!(ExportQuery::default().format, ExportFormat::Csv);
        assert_eq!(
            serde_json::to_value(ExportFormat::Json).unwrap(),
            serde_json::json!("json")
        );
    }
}
