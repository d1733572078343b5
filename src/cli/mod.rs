//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod account;
pub mod alert;
pub mod args;
pub mod collection;
pub mod context;
pub mod defender;
pub mod image;
pub mod init;
pub mod status;
pub mod tag;
pub mod undefended;

pub use args::{AlertFilterArgs, GlobalOptions, OutputFormat, Surface};
pub use context::CommandContext;

/// Spinner for long-running export commands.
pub(crate) fn progress_spinner(label: &str) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_prefix(label.to_string());
    if let Ok(style) = indicatif::ProgressStyle::with_template("{spinner} {prefix}: {msg}") {
        spinner.set_style(style);
    }
    spinner
}

/// prismaop - Prisma Cloud posture and workload reporting companion
#[derive(Parser, Debug)]
#[command(name = "prismaop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "PRISMAOP_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "PRISMAOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "PRISMAOP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize prismaop configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Defender agent reports
    #[command(subcommand)]
    Defender(DefenderCommands),

    /// Undefended resource reports
    #[command(subcommand)]
    Undefended(UndefendedCommands),

    /// Container image reports
    #[command(subcommand)]
    Image(ImageCommands),

    /// List onboarded cloud accounts
    #[command(subcommand)]
    Account(AccountCommands),

    /// View and reconcile collections
    #[command(subcommand)]
    Collection(CollectionCommands),

    /// View and export alerts
    #[command(subcommand)]
    Alert(AlertCommands),

    /// Resource tag reports
    #[command(subcommand)]
    Tag(TagCommands),
}

#[derive(Subcommand, Debug)]
pub enum DefenderCommands {
    /// Export deployed defenders by version band to a workbook
    Report {
        /// Output workbook path
        #[arg(long, default_value = "defender_versions.xlsx")]
        out: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum UndefendedCommands {
    /// Export undefended resources per provider to a workbook
    Report {
        /// Output workbook path
        #[arg(long, default_value = "undefended_resources.xlsx")]
        out: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// Export image vulnerability findings to CSV
    Vulns {
        /// Output CSV path
        #[arg(long, default_value = "image_vulnerabilities.csv")]
        out: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// List onboarded cloud accounts
    List,
}

#[derive(Subcommand, Debug)]
pub enum CollectionCommands {
    /// List collections on one API surface
    List {
        /// API surface to list
        #[arg(long, value_enum, default_value = "cspm")]
        target: Surface,
    },

    /// Reconcile collections from a business-unit roster spreadsheet
    Sync {
        /// Roster spreadsheet path
        #[arg(long)]
        source: String,

        /// API surface to reconcile
        #[arg(long, value_enum)]
        target: Surface,

        /// Collection name prefix (defaults to the surface convention)
        #[arg(long)]
        prefix: Option<String>,

        /// Report file for roster accounts not onboarded to the tenant
        #[arg(long, default_value = "nononboarded_accounts.txt")]
        rejected_out: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AlertCommands {
    /// List alerts in a relative time window
    List {
        #[command(flatten)]
        filters: AlertFilterArgs,
    },

    /// Export all alerts to CSV via the async console job
    Export {
        /// Output CSV path
        #[arg(long, default_value = "alerts.csv")]
        out: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Report resources carrying a tag key
    Report {
        /// Tag key to search for
        #[arg(long, default_value = "owner_team")]
        key: String,

        /// Maximum resources to fetch
        #[arg(long, default_value_t = 1000)]
        limit: usize,
    },
}
