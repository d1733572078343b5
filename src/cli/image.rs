//! Image vulnerability report command

use std::path::Path;

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, progress_spinner};
use crate::client::{ListingApi, PageQuery};
use crate::error::Result;
use crate::models::{ImageVulnProjector, ImageVulnRow};
use crate::pipeline::{ExportOptions, run_export};
use crate::sink::{CsvSink, RowSink};

/// Export every (deployment, CVE) pair across scanned images to CSV.
pub async fn vulns(opts: &GlobalOptions, out: &str) -> Result<()> {
    let ctx = CommandContext::new(opts.format, opts.config_ref()).await?;

    let mut sink = CsvSink::<ImageVulnRow>::create(Path::new(out))?;
    let options = ExportOptions::with_page_size(ctx.config.page_size);

    let client = ctx.client.clone();
    let fetch = move |query: PageQuery| {
        let client = client.clone();
        async move { client.images_page(query).await }
    };

    let progress = progress_spinner("images");
    let stats = run_export(fetch, &ImageVulnProjector, &mut sink, &options, &progress).await?;
    progress.finish_with_message(format!("{} findings", stats.rows));

    sink.finalize()?;
    println!(
        "{} Wrote {} findings from {} pages to {}",
        "✓".green(),
        stats.rows,
        stats.pages,
        out.cyan()
    );
    Ok(())
}
