//! Tag report command
//!
//! RQL config search for resources carrying a tag key, flattened to one
//! row per resource with the tag's value.

use crate::cli::args::GlobalOptions;
use crate::cli::CommandContext;
use crate::client::ListingApi;
use crate::error::Result;
use crate::models::display::TagDisplay;
use crate::output;

pub async fn report(opts: &GlobalOptions, key: &str, limit: usize) -> Result<()> {
    let ctx = CommandContext::new(opts.format, opts.config_ref()).await?;

    let rql = format!("config from cloud.resource where tag.key = '{key}'");
    let items = ctx.client.search_config(&rql, limit).await?;
    let displays: Vec<TagDisplay> = items
        .iter()
        .map(|item| TagDisplay::for_key(item, key))
        .collect();

    output::print(&displays, ctx.format)
}
