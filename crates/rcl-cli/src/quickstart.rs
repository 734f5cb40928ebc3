//! # Quickstart Subcommand
//!
//! Runs the onboarding walkthrough against a live tenant: health, one
//! evaluation, the active rules, then the most recent decisions. Each
//! step prints a `## <step>` header followed by the JSON result.
//!
//! Health, rules, and decisions failures abort the walkthrough. The
//! evaluation step is fail-open, so a fallback verdict is printed and the
//! walkthrough continues. It exits 1 when the evaluation fell back.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use rcl_client::decisions::DecisionQuery;
use rcl_client::{EvaluationRequest, RclClient};

use crate::print_json;

/// Arguments for the `rcl quickstart` subcommand.
#[derive(Args, Debug)]
pub struct QuickstartArgs {
    #[arg(long, default_value = "partner_alpha")]
    pub entity_id: String,
    #[arg(long, default_value_t = 15000.0)]
    pub amount: f64,
    /// Rows of the decision log to show at the end.
    #[arg(long, default_value_t = 5)]
    pub limit: u32,
}

/// Execute the quickstart walkthrough.
pub async fn run_quickstart(
    args: &QuickstartArgs,
    client: &RclClient,
    out: &mut dyn Write,
) -> Result<u8> {
    writeln!(out, "## health")?;
    let health = client.health().await.context("RCL health check failed")?;
    print_json(out, &health)?;

    writeln!(out, "## evaluate")?;
    let event_id = format!("quickstart_{}", uuid::Uuid::new_v4().simple());
    let req = EvaluationRequest::new(event_id, args.entity_id.clone(), args.amount);
    let result = client.evaluate_request(&req).await;
    print_json(out, &result)?;

    writeln!(out, "## rules")?;
    let rules = client.policy().rules().await.context("failed to list rules")?;
    print_json(out, &serde_json::json!({ "rules": rules }))?;

    writeln!(out, "## decisions")?;
    let query = DecisionQuery {
        limit: Some(args.limit),
        ..Default::default()
    };
    let page = client
        .decisions()
        .list(&query)
        .await
        .context("failed to query decisions")?;
    print_json(out, &page)?;

    Ok(if result.is_fallback() { 1 } else { 0 })
}
