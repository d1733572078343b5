//! Account list command

use crate::cli::args::GlobalOptions;
use crate::cli::CommandContext;
use crate::client::ListingApi;
use crate::error::Result;
use crate::models::display::AccountDisplay;
use crate::output;

pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts.format, opts.config_ref()).await?;

    let accounts = ctx.client.list_accounts().await?;
    let displays: Vec<AccountDisplay> = accounts.iter().map(AccountDisplay::from).collect();

    output::print(&displays, ctx.format)
}
