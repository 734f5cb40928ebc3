//! RCL API client error types.

/// Errors from RCL API calls.
///
/// `evaluate` never surfaces these; it converts every variant into a
/// fail-open `allow` result. All other operations return them as-is.
#[derive(Debug, thiserror::Error)]
pub enum RclApiError {
    /// HTTP transport error (connection refused, DNS, TLS, body read).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// No complete response arrived before the deadline.
    #[error("{endpoint} timed out after {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },
    /// RCL returned a non-2xx status.
    #[error("RCL API {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response body was not the expected JSON document.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: serde_json::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl RclApiError {
    /// Short failure class, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } => "network",
            Self::Timeout { .. } => "timeout",
            Self::ApiError { .. } => "status",
            Self::Deserialization { .. } => "parse",
            Self::Config(_) => "config",
        }
    }

    /// HTTP status, when the server answered with a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_endpoint_and_deadline() {
        let err = RclApiError::Timeout {
            endpoint: "POST /v1/evaluate".into(),
            timeout_ms: 3000,
        };
        assert_eq!(err.to_string(), "POST /v1/evaluate timed out after 3000ms");
        assert_eq!(err.kind(), "timeout");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn api_error_exposes_status() {
        let err = RclApiError::ApiError {
            endpoint: "GET /v1/policy".into(),
            status: 401,
            body: r#"{"detail":"Invalid or missing API key"}"#.into(),
        };
        assert_eq!(err.kind(), "status");
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn parse_failure_kind() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = RclApiError::Deserialization {
            endpoint: "GET /health".into(),
            source,
        };
        assert_eq!(err.kind(), "parse");
    }
}
