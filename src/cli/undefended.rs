//! Undefended resource report command
//!
//! One workbook sheet per cloud provider, each fed by its own paged
//! fetch over the discovery API with `defended=false`.

use std::path::Path;

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, progress_spinner};
use crate::client::{ListingApi, PageQuery};
use crate::error::Result;
use crate::models::{UndefendedProjector, UndefendedRow};
use crate::pipeline::{ExportOptions, run_export};
use crate::sink::{RowSink, WorkbookSink};

/// Providers reported on, in sheet order.
const PROVIDERS: &[&str] = &["aws", "azure", "gcp", "oci", "alibaba", "ibm"];

pub async fn report(opts: &GlobalOptions, out: &str) -> Result<()> {
    let ctx = CommandContext::new(opts.format, opts.config_ref()).await?;

    let mut sink = WorkbookSink::create(Path::new(out));
    let options = ExportOptions::with_page_size(ctx.config.page_size);

    let mut total_rows = 0usize;
    for provider in PROVIDERS {
        sink.add_sheet::<UndefendedRow>(provider)?;

        let client = ctx.client.clone();
        let fetch = move |query: PageQuery| {
            let client = client.clone();
            async move { client.undefended_page(provider, query).await }
        };

        let progress = progress_spinner(provider);
        let stats = run_export(fetch, &UndefendedProjector, &mut sink, &options, &progress).await?;
        progress.finish_with_message(format!("{} resources", stats.rows));
        total_rows += stats.rows;
    }

    RowSink::<UndefendedRow>::finalize(&mut sink)?;
    println!(
        "{} Wrote {} undefended resources to {}",
        "✓".green(),
        total_rows,
        out.cyan()
    );
    Ok(())
}
