//! # Decisions Subcommand
//!
//! Decision log queries.
//!
//! - `list`: Recent decisions, with optional filters.
//! - `export`: CSV or JSON export, to stdout or a file.
//! - `stats`: Aggregate verdict counts.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use rcl_client::decisions::{DecisionQuery, ExportFormat, ExportQuery};
use rcl_client::{RclClient, Verdict};

use crate::print_json;

/// Arguments for the `rcl decisions` subcommand.
#[derive(Args, Debug)]
pub struct DecisionsArgs {
    #[command(subcommand)]
    pub command: DecisionsCommand,
}

/// Export encodings accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// Decision log subcommands.
#[derive(Subcommand, Debug)]
pub enum DecisionsCommand {
    /// Query the decision log.
    List {
        /// Maximum rows (server caps at 1000).
        #[arg(long, default_value_t = 100)]
        limit: u32,
        #[arg(long)]
        entity_id: Option<String>,
        /// allow, hold-for-review or block.
        #[arg(long)]
        verdict: Option<Verdict>,
        #[arg(long)]
        tenant: Option<String>,
        #[arg(long)]
        scenario: Option<String>,
    },

    /// Export the decision log.
    Export {
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        #[arg(long)]
        date_from: Option<String>,
        #[arg(long)]
        date_to: Option<String>,
        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Aggregate verdict counts.
    Stats {
        #[arg(long)]
        tenant: Option<String>,
        #[arg(long)]
        scenario: Option<String>,
    },
}

/// Execute the decisions subcommand.
pub async fn run_decisions(
    args: &DecisionsArgs,
    client: &RclClient,
    out: &mut dyn Write,
) -> Result<u8> {
    match &args.command {
        DecisionsCommand::List {
            limit,
            entity_id,
            verdict,
            tenant,
            scenario,
        } => {
            let query = DecisionQuery {
                limit: Some(*limit),
                entity_id: entity_id.clone(),
                verdict: *verdict,
                tenant: tenant.clone(),
                scenario: scenario.clone(),
            };
            let page = client
                .decisions()
                .list(&query)
                .await
                .context("failed to query decisions")?;
            print_json(out, &page)?;
        }

        DecisionsCommand::Export {
            format,
            date_from,
            date_to,
            output,
        } => {
            let query = ExportQuery {
                format: (*format).into(),
                date_from: date_from.clone(),
                date_to: date_to.clone(),
            };
            let body = client
                .decisions()
                .export(&query)
                .await
                .context("failed to export decisions")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &body)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), bytes = body.len(), "export written");
                }
                None => {
                    out.write_all(body.as_bytes())?;
                    if !body.ends_with('\n') {
                        writeln!(out)?;
                    }
                }
            }
        }

        DecisionsCommand::Stats { tenant, scenario } => {
            let stats = client
                .decisions()
                .stats(tenant.as_deref(), scenario.as_deref())
                .await
                .context("failed to fetch stats")?;
            print_json(out, &stats)?;
        }
    }
    Ok(0)
}
