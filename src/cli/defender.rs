//! Defender report command
//!
//! Builds a three-sheet workbook splitting deployed defender agents by
//! version band relative to the console release: same major, one major
//! behind, and older (or unparsable).

use std::path::Path;

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, progress_spinner};
use crate::client::{ListingApi, PageQuery};
use crate::error::{Error, Result};
use crate::models::{DefenderProjector, DefenderRow, VersionBand};
use crate::pipeline::{ExportOptions, run_export};
use crate::sink::{RowSink, WorkbookSink};

pub async fn report(opts: &GlobalOptions, out: &str) -> Result<()> {
    let ctx = CommandContext::new(opts.format, opts.config_ref()).await?;

    let version = ctx.client.console_version().await?;
    let console_major = parse_major(&version)?;
    println!("Console version: {}", version.cyan());

    let mut sink = WorkbookSink::create(Path::new(out));
    let options = ExportOptions::with_page_size(ctx.config.page_size);

    let mut total_rows = 0usize;
    for band in [
        VersionBand::Current,
        VersionBand::Previous,
        VersionBand::Outdated,
    ] {
        sink.add_sheet::<DefenderRow>(band.sheet_name())?;

        let client = ctx.client.clone();
        let fetch = move |query: PageQuery| {
            let client = client.clone();
            async move { client.defenders_page(query).await }
        };

        let progress = progress_spinner(&format!("defenders ({})", band.sheet_name()));
        let projector = DefenderProjector {
            band,
            console_major,
        };
        let stats = run_export(fetch, &projector, &mut sink, &options, &progress).await?;
        progress.finish_with_message(format!("{} agents", stats.rows));
        total_rows += stats.rows;
    }

    RowSink::<DefenderRow>::finalize(&mut sink)?;
    println!(
        "{} Wrote {} agents to {}",
        "✓".green(),
        total_rows,
        out.cyan()
    );
    Ok(())
}

fn parse_major(version: &str) -> Result<u32> {
    version
        .split('.')
        .next()
        .and_then(|major| major.trim().parse().ok())
        .ok_or_else(|| Error::Other(format!("unparsable console version: {version}")))
}
