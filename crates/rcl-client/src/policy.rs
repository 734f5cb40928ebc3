//! Typed client for tenant policy and the derived rule list.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/v1/policy` | Current thresholds and version |
//! | PUT    | `/v1/policy` | Replace thresholds (version auto-increments) |
//! | GET    | `/v1/rules`  | Active rules derived from the policy |
//!
//! Threshold documents are opaque to the client: the keys are rule ids
//! (`R-CEIL`, `R-VEL`, `R-COHORT`, ...) and the values are whatever the
//! tenant's rules accept.

use serde::{Deserialize, Serialize};

use crate::error::RclApiError;
use crate::transport::Transport;

/// Rule id → threshold object.
pub type Thresholds = serde_json::Map<String, serde_json::Value>;

/// Versioned policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub policy: Thresholds,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One active rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// `ceiling`, `velocity`, `cohort`, `drift`, ...
    #[serde(default, rename = "type")]
    pub rule_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
}

#[derive(Debug, Deserialize)]
struct RulesResponse {
    #[serde(default)]
    rules: Vec<Rule>,
}

/// Client for `/v1/policy` and `/v1/rules`.
#[derive(Debug, Clone)]
pub struct PolicyClient {
    transport: Transport,
}

impl PolicyClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch the current policy.
    pub async fn get(&self) -> Result<Policy, RclApiError> {
        let url = self.transport.url("v1/policy");
        self.transport
            .json("GET /v1/policy", self.transport.http.get(&url))
            .await
    }

    /// Replace the policy thresholds. Returns the stored policy with its
    /// new version. Events evaluated afterwards use the new thresholds.
    pub async fn put(&self, thresholds: &Thresholds) -> Result<Policy, RclApiError> {
        let url = self.transport.url("v1/policy");
        let policy = self
            .transport
            .json::<Policy>("PUT /v1/policy", self.transport.http.put(&url).json(thresholds))
            .await?;
        tracing::info!(version = policy.version, "RCL policy updated");
        Ok(policy)
    }

    /// List active rules.
    pub async fn rules(&self) -> Result<Vec<Rule>, RclApiError> {
        let url = self.transport.url("v1/rules");
        let resp: RulesResponse = self
            .transport
            .json("GET /v1/rules", self.transport.http.get(&url))
            .await?;
        Ok(resp.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_type_maps_from_type_key() {
        let rule: Rule = serde_json::from_value(serde_json::json!({
            "id": "R-VEL",
            "name": "Velocity limit",
            "type": "velocity",
            "thresholds": {"max_tx_per_hour": 50, "window_hours": 1}
        }))
        .unwrap();
        assert_eq!(rule.rule_type.as_deref(), Some("velocity"));
        assert_eq!(rule.thresholds.unwrap()["max_tx_per_hour"], 50);
    }

    #[test]
    fn policy_tolerates_missing_fields() {
        let policy: Policy = serde_json::from_value(serde_json::json!({
            "policy": {"R-CEIL": {"daily_limit": 500000, "action": "block"}}
        }))
        .unwrap();
        assert_eq!(policy.version, 0);
        assert!(policy.updated_at.is_none());
        assert_eq!(policy.policy["R-CEIL"]["action"], "block");
    }
}
