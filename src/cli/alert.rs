//! Alert list and export commands

use std::time::Duration;

use colored::Colorize;

use crate::cli::args::{AlertFilterArgs, GlobalOptions};
use crate::cli::{CommandContext, progress_spinner};
use crate::client::api::ExportApi;
use crate::client::ListingApi;
use crate::error::{ApiError, Result};
use crate::models::display::AlertDisplay;
use crate::output;

/// Poll attempts before giving up on the export job.
const MAX_POLL_ATTEMPTS: u32 = 60;
const POLL_INTERVAL: Duration = Duration::from_secs(5);

pub async fn list(opts: &GlobalOptions, filters: &AlertFilterArgs) -> Result<()> {
    let ctx = CommandContext::new(opts.format, opts.config_ref()).await?;

    let alerts = ctx.client.list_alerts(&filters.to_query()).await?;
    let displays: Vec<AlertDisplay> = alerts.iter().map(AlertDisplay::from).collect();

    output::print(&displays, ctx.format)
}

/// Export all alerts via the console's async CSV job: submit, poll
/// until ready, download.
pub async fn export(opts: &GlobalOptions, out: &str) -> Result<()> {
    let ctx = CommandContext::new(opts.format, opts.config_ref()).await?;

    let progress = progress_spinner("alert export");
    progress.set_message("submitting job");
    let mut job = ctx.client.submit_alert_csv().await?;

    let mut attempts = 0u32;
    while !job.is_ready() {
        attempts += 1;
        if attempts > MAX_POLL_ATTEMPTS {
            return Err(ApiError::ExportJob(format!(
                "job {} not ready after {} polls",
                job.id, MAX_POLL_ATTEMPTS
            ))
            .into());
        }
        progress.set_message(format!(
            "waiting ({})",
            job.status.as_deref().unwrap_or("unknown")
        ));
        progress.tick();
        tokio::time::sleep(POLL_INTERVAL).await;
        job = ctx.client.alert_csv_status(&job).await?;
    }

    progress.set_message("downloading");
    let bytes = ctx.client.download_alert_csv(&job.id).await?;
    std::fs::write(out, &bytes)?;
    progress.finish_with_message(format!("{} bytes", bytes.len()));

    println!("{} Wrote alert export to {}", "✓".green(), out.cyan());
    Ok(())
}
