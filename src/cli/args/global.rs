//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global flags collected once in main and passed to every handler.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ./config.ini)
    pub config: Option<String>,

    /// Verbose diagnostic logging
    pub debug: bool,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            debug: cli.debug,
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}
