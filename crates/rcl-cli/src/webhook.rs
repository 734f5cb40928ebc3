//! # Webhook Subcommand
//!
//! Alert webhook configuration: `get`, `set`, `delete`.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use rcl_client::webhook::WebhookConfig;
use rcl_client::RclClient;

use crate::print_json;

/// Arguments for the `rcl webhook` subcommand.
#[derive(Args, Debug)]
pub struct WebhookArgs {
    #[command(subcommand)]
    pub command: WebhookCommand,
}

/// Webhook subcommands.
#[derive(Subcommand, Debug)]
pub enum WebhookCommand {
    /// Show the configured webhook.
    Get,

    /// Set the webhook target.
    Set {
        /// HTTPS endpoint receiving alerts.
        #[arg(long)]
        url: String,
        /// Triggering verdicts/events. Repeat for several.
        #[arg(long = "event")]
        events: Vec<String>,
        /// Store the target but keep deliveries off.
        #[arg(long)]
        disabled: bool,
    },

    /// Remove the webhook target.
    Delete,
}

/// Execute the webhook subcommand.
pub async fn run_webhook(
    args: &WebhookArgs,
    client: &RclClient,
    out: &mut dyn Write,
) -> Result<u8> {
    match &args.command {
        WebhookCommand::Get => {
            let config = client.webhook().get().await.context("failed to fetch webhook")?;
            print_json(out, &config)?;
        }
        WebhookCommand::Set {
            url,
            events,
            disabled,
        } => {
            let mut config = WebhookConfig::new(url.clone());
            config.events = events.clone();
            config.enabled = Some(!disabled);
            let saved = client.webhook().put(&config).await.context("failed to set webhook")?;
            print_json(out, &saved)?;
        }
        WebhookCommand::Delete => {
            client.webhook().delete().await.context("failed to delete webhook")?;
            print_json(out, &serde_json::json!({ "deleted": true }))?;
        }
    }
    Ok(0)
}
