//! Command execution context
//!
//! Loads configuration exactly once, builds the API client, and logs in
//! before the command body runs. A failed login here is fatal: no
//! command proceeds to issue requests with dead credentials.

use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::client::{AuthApi, PrismaClient};
use crate::config::Config;
use crate::error::Result;

/// Shared state for authenticated commands.
pub struct CommandContext {
    pub config: Config,
    pub client: Arc<PrismaClient>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config, construct the client, and authenticate.
    pub async fn new(format: OutputFormat, config_path: Option<&str>) -> Result<Self> {
        let config = Config::load_at(config_path)?;
        let client = Arc::new(PrismaClient::new(&config)?);
        client.login().await?;

        Ok(Self {
            config,
            client,
            format,
        })
    }
}
