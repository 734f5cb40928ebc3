//! # Policy and Rules Subcommands
//!
//! - `rcl policy get`: Print the current policy and version.
//! - `rcl policy set <FILE>`: Replace thresholds from a JSON or YAML file.
//! - `rcl rules`: List active rules.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use rcl_client::RclClient;

use crate::{load_thresholds, print_json};

/// Arguments for the `rcl policy` subcommand.
#[derive(Args, Debug)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub command: PolicyCommand,
}

/// Policy subcommands.
#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// Print the current policy.
    Get,

    /// Replace the policy thresholds.
    Set {
        /// JSON or YAML file keyed by rule id.
        file: PathBuf,
    },
}

/// Execute the policy subcommand.
pub async fn run_policy(args: &PolicyArgs, client: &RclClient, out: &mut dyn Write) -> Result<u8> {
    match &args.command {
        PolicyCommand::Get => {
            let policy = client.policy().get().await.context("failed to fetch policy")?;
            print_json(out, &policy)?;
        }
        PolicyCommand::Set { file } => {
            let thresholds = load_thresholds(file)?;
            let policy = client
                .policy()
                .put(&thresholds)
                .await
                .context("failed to update policy")?;
            print_json(out, &policy)?;
        }
    }
    Ok(0)
}

/// Execute the rules subcommand.
pub async fn run_rules(client: &RclClient, out: &mut dyn Write) -> Result<u8> {
    let rules = client.policy().rules().await.context("failed to list rules")?;
    print_json(out, &serde_json::json!({ "rules": rules }))?;
    Ok(0)
}
