//! # rcl-cli: CLI Tool for the Froddy RCL API
//!
//! Provides the `rcl` command-line interface, replacing the `curl`
//! quickstart script with typed subcommands over `rcl-client`.
//!
//! ## Subcommands
//!
//! - `rcl health`: Service liveness.
//! - `rcl evaluate`: Submit one event, print the verdict (fail-open).
//! - `rcl policy get|set` / `rcl rules`: Thresholds and active rules.
//! - `rcl decisions list|export|stats`: Decision log.
//! - `rcl webhook get|set|delete`: Alert webhook target.
//! - `rcl report` / `rcl sensitivity`: Pilot summary and what-if analysis.
//! - `rcl quickstart`: The documented walkthrough in one go.
//!
//! ```bash
//! export RCL_API_KEY=rcl_...
//! rcl evaluate --entity-id partner_alpha --amount 15000
//! rcl decisions list --limit 20
//! rcl policy set policy.yaml
//! ```
//!
//! Every handler writes its result to the supplied writer and returns
//! the process exit code.

pub mod decisions;
pub mod evaluate;
pub mod policy;
pub mod quickstart;
pub mod report;
pub mod webhook;

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rcl_client::policy::Thresholds;
use rcl_client::{RclClient, RclConfig};

/// Build a client from the global CLI flags.
pub fn connect(base_url: &str, api_key: &str, timeout_ms: u64) -> Result<RclClient> {
    let config = RclConfig::new(base_url, api_key)
        .context("invalid RCL configuration")?
        .with_timeout_ms(timeout_ms);
    tracing::debug!(?config, "connecting to RCL");
    RclClient::new(config).context("failed to build RCL client")
}

/// Pretty-print a serializable value as JSON, followed by a newline.
pub fn print_json<T: serde::Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to render JSON")?;
    writeln!(out)?;
    Ok(())
}

/// Read a threshold document from a JSON or YAML file.
///
/// `.yaml`/`.yml` files are parsed as YAML; anything else as JSON. The
/// top level must be an object keyed by rule id.
pub fn load_thresholds(path: &Path) -> Result<Thresholds> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let value: serde_json::Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))?
    };

    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => bail!("{}: policy must be a JSON/YAML object", path.display()),
    }
}
