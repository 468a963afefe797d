use anyhow::Result;
use clap::Parser;
use gourmetlog::config::Config;
use tracing_subscriber::EnvFilter;

use super::{Cli, Commands};
use crate::cli_cmds::*;

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    init_tracing(&config.log.level);

    let journal_path = cli.journal.unwrap_or_else(|| config.journal_path());

    match cli.command {
        Commands::Log { action } => {
            cmd_log(action, &journal_path)?;
        }
        Commands::Rank { id } => {
            cmd_rank(id, &journal_path)?;
        }
        Commands::Discover { catalog, limit } => {
            let catalog = catalog.or_else(|| config.catalog_path());
            let limit = limit.unwrap_or(config.discover.limit);
            cmd_discover(&journal_path, catalog.as_deref(), limit)?;
        }
        Commands::Score {
            reference,
            candidate,
        } => {
            cmd_score(reference.as_ref(), &candidate);
        }
        Commands::Stats => {
            cmd_stats(&journal_path)?;
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
