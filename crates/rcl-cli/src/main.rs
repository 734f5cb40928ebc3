//! # rcl CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Connection settings come from flags or the `RCL_*` environment
//! variables also read by `RclConfig::from_env`.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rcl_cli::decisions::{run_decisions, DecisionsArgs};
use rcl_cli::evaluate::{run_evaluate, run_health, EvaluateArgs};
use rcl_cli::policy::{run_policy, run_rules, PolicyArgs};
use rcl_cli::quickstart::{run_quickstart, QuickstartArgs};
use rcl_cli::report::{run_report, run_sensitivity, SensitivityArgs};
use rcl_cli::webhook::{run_webhook, WebhookArgs};
use rcl_client::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};

/// Froddy RCL CLI
///
/// Shadow-mode risk control for automated payouts: evaluate events,
/// manage policy thresholds, and inspect the decision log.
#[derive(Parser, Debug)]
#[command(name = "rcl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// RCL service base URL.
    #[arg(long, env = "RCL_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Tenant API key, sent as X-API-Key.
    #[arg(long, env = "RCL_API_KEY", default_value = "", hide_env_values = true, global = true)]
    api_key: String,

    /// Request timeout in milliseconds.
    #[arg(long, env = "RCL_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS, global = true)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check service liveness.
    Health,

    /// Evaluate one payout event (fail-open).
    Evaluate(EvaluateArgs),

    /// Read or replace policy thresholds.
    Policy(PolicyArgs),

    /// List active rules.
    Rules,

    /// Query, export, or summarize the decision log.
    Decisions(DecisionsArgs),

    /// Configure the alert webhook.
    Webhook(WebhookArgs),

    /// Print the pilot summary report.
    Report,

    /// What-if analysis for candidate thresholds.
    Sensitivity(SensitivityArgs),

    /// Run the onboarding walkthrough: health, evaluate, rules, decisions.
    Quickstart(QuickstartArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level. Logs go to stderr so
    // stdout stays machine-readable.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("rcl CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let client = match rcl_cli::connect(&cli.base_url, &cli.api_key, cli.timeout_ms) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Commands::Health => run_health(&client, &mut out).await,
        Commands::Evaluate(args) => run_evaluate(args, &client, &mut out).await,
        Commands::Policy(args) => run_policy(args, &client, &mut out).await,
        Commands::Rules => run_rules(&client, &mut out).await,
        Commands::Decisions(args) => run_decisions(args, &client, &mut out).await,
        Commands::Webhook(args) => run_webhook(args, &client, &mut out).await,
        Commands::Report => run_report(&client, &mut out).await,
        Commands::Sensitivity(args) => run_sensitivity(args, &client, &mut out).await,
        Commands::Quickstart(args) => run_quickstart(args, &client, &mut out).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
