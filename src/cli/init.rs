//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{AuthApi, PrismaClient};
use crate::config::Config;
use crate::error::Result;

/// Interactive setup: prompt for tenant endpoints and credentials,
/// verify them with a live login, and write the config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to prismaop!".bold().green());
    println!("Let's set up your Prisma Cloud configuration.\n");

    let theme = ColorfulTheme::default();

    let cspm_api_url: String = Input::with_theme(&theme)
        .with_prompt("CSPM API URL (e.g. https://api.prismacloud.io)")
        .interact_text()?;

    let cwp_api_url: String = Input::with_theme(&theme)
        .with_prompt("CWP console URL")
        .interact_text()?;

    let username: String = Input::with_theme(&theme)
        .with_prompt("Access key ID")
        .interact_text()?;

    let password: String = Password::with_theme(&theme)
        .with_prompt("Secret key")
        .interact()?;

    let config = Config {
        cspm_api_url: cspm_api_url.trim_end_matches('/').to_string(),
        cwp_api_url: cwp_api_url.trim_end_matches('/').to_string(),
        username,
        password,
        page_size: crate::config::DEFAULT_PAGE_SIZE,
        reauth_every_pages: crate::config::DEFAULT_REAUTH_EVERY,
    };

    println!("\n{}", "Verifying credentials...".cyan());
    let client = PrismaClient::new(&config)?;
    client.login().await?;
    println!("{}", "✓ Authentication successful!".green());

    config.save_at(opts.config_ref())?;

    let path = opts.config_ref().unwrap_or("config.ini");
    println!("\nConfiguration saved to {}", path.cyan());
    Ok(())
}
