//! # Evaluate and Health Subcommands
//!
//! `rcl evaluate` submits one event and prints the verdict. It follows the
//! client's fail-open contract: an unreachable evaluator prints an
//! `allow` result with `"fallback": true` and exits 0, so it can sit in
//! a payout script without ever stopping it. `--strict` reports failures
//! instead and exits 1.
//!
//! `rcl health` prints the service health document; failures exit 1.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;

use rcl_client::evaluation::{DEFAULT_CURRENCY, DEFAULT_EVENT_TYPE, DEFAULT_SCENARIO};
use rcl_client::{EvaluationRequest, RclClient};

use crate::print_json;

/// Arguments for the `rcl evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Idempotency key. A random `evt_<uuid>` is generated when omitted.
    #[arg(long)]
    pub event_id: Option<String>,

    /// Pseudonymous counterparty token (never PII).
    #[arg(long)]
    pub entity_id: String,

    /// Event amount.
    #[arg(long)]
    pub amount: f64,

    #[arg(long, default_value = DEFAULT_EVENT_TYPE)]
    pub event_type: String,

    /// ISO 4217 currency code.
    #[arg(long, default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    /// Tenant policy variant.
    #[arg(long, default_value = DEFAULT_SCENARIO)]
    pub scenario: String,

    #[arg(long)]
    pub tenant: Option<String>,

    /// Event time (RFC 3339). Defaults to now.
    #[arg(long)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Fail instead of falling back to `allow` when RCL is unavailable.
    #[arg(long)]
    pub strict: bool,
}

impl EvaluateArgs {
    /// Build the wire request from the parsed flags.
    pub fn to_request(&self) -> EvaluationRequest {
        let event_id = self
            .event_id
            .clone()
            .unwrap_or_else(|| format!("evt_{}", uuid::Uuid::new_v4().simple()));

        let mut req = EvaluationRequest::new(event_id, self.entity_id.clone(), self.amount)
            .event_type(self.event_type.clone())
            .currency(self.currency.clone())
            .scenario(self.scenario.clone());
        if let Some(tenant) = &self.tenant {
            req = req.tenant(tenant.clone());
        }
        if let Some(ts) = self.timestamp {
            req = req.timestamp(ts);
        }
        req
    }
}

/// Execute the evaluate subcommand.
pub async fn run_evaluate(
    args: &EvaluateArgs,
    client: &RclClient,
    out: &mut dyn Write,
) -> Result<u8> {
    let req = args.to_request();
    tracing::info!(event_id = %req.event_id, entity_id = %req.entity_id, "evaluating event");

    let result = if args.strict {
        client
            .try_evaluate(&req)
            .await
            .with_context(|| format!("evaluation of {} failed", req.event_id))?
    } else {
        client.evaluate_request(&req).await
    };

    print_json(out, &result)?;
    Ok(0)
}

/// Execute the health subcommand.
pub async fn run_health(client: &RclClient, out: &mut dyn Write) -> Result<u8> {
    let health = client.health().await.context("RCL health check failed")?;
    print_json(out, &health)?;
    Ok(if health.is_healthy() { 0 } else { 1 })
}
