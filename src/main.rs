//! prismaop - Prisma Cloud posture and workload reporting companion

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod pipeline;
mod reconcile;
mod sink;

use cli::{
    AccountCommands, AlertCommands, Cli, CollectionCommands, Commands, DefenderCommands,
    GlobalOptions, ImageCommands, TagCommands, UndefendedCommands,
};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let opts = GlobalOptions::from_cli(&cli);

    let mut logger = env_logger::Builder::from_default_env();
    if opts.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("prismaop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Defender(cmd) => match cmd {
            DefenderCommands::Report { out } => cli::defender::report(&opts, &out).await,
        },
        Commands::Undefended(cmd) => match cmd {
            UndefendedCommands::Report { out } => cli::undefended::report(&opts, &out).await,
        },
        Commands::Image(cmd) => match cmd {
            ImageCommands::Vulns { out } => cli::image::vulns(&opts, &out).await,
        },
        Commands::Account(cmd) => match cmd {
            AccountCommands::List => cli::account::list(&opts).await,
        },
        Commands::Collection(cmd) => match cmd {
            CollectionCommands::List { target } => cli::collection::list(&opts, target).await,
            CollectionCommands::Sync {
                source,
                target,
                prefix,
                rejected_out,
            } => {
                cli::collection::sync(&opts, &source, target, prefix.as_deref(), &rejected_out)
                    .await
            }
        },
        Commands::Alert(cmd) => match cmd {
            AlertCommands::List { filters } => cli::alert::list(&opts, &filters).await,
            AlertCommands::Export { out } => cli::alert::export(&opts, &out).await,
        },
        Commands::Tag(cmd) => match cmd {
            TagCommands::Report { key, limit } => cli::tag::report(&opts, &key, limit).await,
        },
    }
}
