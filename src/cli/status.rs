//! Status command implementation
//!
//! Reports what the config file contains without touching the network,
//! so it works offline and with dead credentials.

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "prismaop Configuration Status".bold());

    let path = opts.config_ref().unwrap_or("config.ini");
    println!("Config file: {}", path.cyan());

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("{} CSPM API: {}", "✓".green(), config.cspm_api_url);
            println!("{} CWP console: {}", "✓".green(), config.cwp_api_url);
            println!("{} Access key configured", "✓".green());
            println!("{} Secret key configured", "✓".green());
            println!();
            println!("Page size: {}", config.page_size);
            println!("Re-login interval: every {} pages", config.reauth_every_pages);
        }
        Err(err) => {
            println!("{} {}", "✗".red(), err);
            println!("  → Run 'prismaop init' to configure");
        }
    }

    Ok(())
}
