//! Collection list and sync commands

use std::path::Path;

use colored::Colorize;
use log::info;

use crate::cli::args::{GlobalOptions, Surface};
use crate::cli::CommandContext;
use crate::client::ListingApi;
use crate::error::Result;
use crate::models::display::CollectionDisplay;
use crate::output;
use crate::reconcile::{self, Target};

pub async fn list(opts: &GlobalOptions, target: Surface) -> Result<()> {
    let ctx = CommandContext::new(opts.format, opts.config_ref()).await?;

    let displays: Vec<CollectionDisplay> = match target {
        Surface::Cspm => ctx
            .client
            .list_cspm_collections()
            .await?
            .iter()
            .map(CollectionDisplay::from)
            .collect(),
        Surface::Cwp => ctx
            .client
            .list_cwp_collections()
            .await?
            .iter()
            .map(CollectionDisplay::from)
            .collect(),
    };

    output::print(&displays, ctx.format)
}

/// Reconcile one surface's collections from the business-unit roster.
///
/// Roster accounts the tenant has never onboarded are dropped and
/// written to the rejected report. Existing collections with no roster
/// counterpart are left untouched.
pub async fn sync(
    opts: &GlobalOptions,
    source: &str,
    target: Surface,
    prefix: Option<&str>,
    rejected_out: &str,
) -> Result<()> {
    let ctx = CommandContext::new(opts.format, opts.config_ref()).await?;

    let prefix = prefix.unwrap_or_else(|| target.default_prefix());
    let units = reconcile::load_business_units(Path::new(source), prefix)?;
    info!("roster: {} business units", units.len());

    let onboarded = ctx.client.list_accounts().await?;
    let (units, rejected) = reconcile::filter_onboarded(units, &onboarded);
    if !rejected.is_empty() {
        reconcile::write_rejected_report(Path::new(rejected_out), &rejected)?;
        println!(
            "{} {} roster accounts not onboarded, listed in {}",
            "⚠".yellow(),
            rejected.len(),
            rejected_out.cyan()
        );
    }

    let plan = match target.target() {
        Target::Cspm => {
            let existing = ctx.client.list_cspm_collections().await?;
            reconcile::plan_cspm(&units, &existing)
        }
        Target::Cwp => {
            let existing = ctx.client.list_cwp_collections().await?;
            reconcile::plan_cwp(&units, &existing)
        }
    };

    let stats = reconcile::apply(ctx.client.as_ref(), target.target(), &plan).await?;
    println!(
        "{} Collections reconciled: {} created, {} updated",
        "✓".green(),
        stats.created,
        stats.updated
    );
    Ok(())
}
