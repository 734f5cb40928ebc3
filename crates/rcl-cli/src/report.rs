//! # Report and Sensitivity Subcommands

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use rcl_client::reports::SensitivityRequest;
use rcl_client::RclClient;

use crate::{load_thresholds, print_json};

/// Arguments for the `rcl sensitivity` subcommand.
#[derive(Args, Debug)]
pub struct SensitivityArgs {
    /// Candidate thresholds (JSON or YAML), keyed by rule id.
    pub file: PathBuf,
    #[arg(long)]
    pub tenant: Option<String>,
    #[arg(long)]
    pub scenario: Option<String>,
    /// Number of recent decisions to replay.
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Execute the report subcommand.
pub async fn run_report(client: &RclClient, out: &mut dyn Write) -> Result<u8> {
    let report = client.reports().pilot().await.context("failed to fetch pilot report")?;
    print_json(out, &report)?;
    Ok(0)
}

/// Execute the sensitivity subcommand.
pub async fn run_sensitivity(
    args: &SensitivityArgs,
    client: &RclClient,
    out: &mut dyn Write,
) -> Result<u8> {
    let req = SensitivityRequest {
        policy: load_thresholds(&args.file)?,
        tenant: args.tenant.clone(),
        scenario: args.scenario.clone(),
        limit: args.limit,
    };
    let analysis = client
        .reports()
        .sensitivity(&req)
        .await
        .context("sensitivity analysis failed")?;
    print_json(out, &analysis)?;
    Ok(0)
}
