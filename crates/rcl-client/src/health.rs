//! Liveness probe for `GET /health`.
//!
//! Unlike evaluation, health has no fallback: transport and status
//! errors go straight back to the caller.

use serde::{Deserialize, Serialize};

/// Service status as reported by `GET /health`.
///
/// Only `status` is guaranteed. Other fields vary across deployments and
/// are optional; anything not modeled lands in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_healthy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// `shadow` while the service only observes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime_s: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HealthStatus {
    /// `status == "ok"` and the database, when reported, is healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "ok" && self.db_healthy.unwrap_or(true)
    }

    /// True when the service reports shadow (observe-only) mode.
    pub fn is_shadow_mode(&self) -> bool {
        self.mode.as_deref() == Some("shadow")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_health_document() {
        let h: HealthStatus = serde_json::from_value(serde_json::json!({
            "status": "ok",
            "service": "rcl-proto",
            "mode": "shadow",
            "version": "0.2.0",
            "commit": "abc1234",
            "db_path": "/data/rcl.db",
            "auth_enabled": true,
            "uptime_s": 3600
        }))
        .unwrap();
        assert!(h.is_healthy());
        assert!(h.is_shadow_mode());
        assert_eq!(h.uptime_s, Some(3600));
        assert_eq!(h.extra["db_path"], "/data/rcl.db");
    }

    #[test]
    fn unhealthy_database_is_reported() {
        let h: HealthStatus =
            serde_json::from_value(serde_json::json!({"status": "ok", "db_healthy": false}))
                .unwrap();
        assert!(!h.is_healthy());
        assert!(!h.is_shadow_mode());
    }
}
