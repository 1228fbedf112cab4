//! Command implementations for the verdict scraper CLI
//!
//! Each pipeline stage is implemented in its own module:
//! - `harvest`: search results to a yearly listing
//! - `fetch`: listings to downloaded documents
//! - `analyze`: downloaded documents to a stats file

pub mod analyze;
pub mod fetch;
pub mod harvest;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::{Context, Result};

/// Run the selected subcommand
///
/// Logging must already be set up. Does nothing without a subcommand.
pub fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        return Ok(());
    };

    let config = shared::load_configuration(&args.global).context("Failed to load configuration")?;
    let quiet = args.global.quiet;

    match command {
        Commands::Harvest(harvest_args) => {
            harvest::run_harvest(&harvest_args, &config, quiet).context("Harvest failed")
        }
        Commands::Fetch(fetch_args) => {
            fetch::run_fetch(&fetch_args, &config, quiet).context("Fetch failed")
        }
        Commands::Analyze => analyze::run_analyze(&config, quiet).context("Analysis failed"),
    }
}
