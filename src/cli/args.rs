//! Command-line argument definitions for the verdict scraper
//!
//! One subcommand per pipeline stage. Positional arguments are optional at
//! the parser level: a command missing them prints its usage and exits
//! successfully, as the stage scripts always did.

use crate::constants::DEFAULT_PAGE_INCREMENT;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the verdict scraper
#[derive(Debug, Clone, Parser)]
#[command(
    name = "verdict-scraper",
    version,
    about = "Harvest, download and analyze administrative-court verdicts",
    long_about = "Walks the judgment search of the administrative justice portal for a query and \
                  year, writes a per-year CSV listing, downloads the listed documents and computes \
                  extension and court statistics over the downloaded corpus."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct GlobalArgs {
    /// Configuration file
    ///
    /// When omitted, ./config.yml and then the user config directory are
    /// tried before falling back to built-in defaults.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Configuration file (YAML)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Pipeline stages
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Walk the search results and write the year's listing
    Harvest(HarvestArgs),
    /// Download the documents of one or more yearly listings
    Fetch(FetchArgs),
    /// Compute statistics over the downloaded year directories
    Analyze,
}

/// Arguments for the harvest command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct HarvestArgs {
    /// Free-text search query
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Decision year
    #[arg(value_name = "YEAR")]
    pub year: Option<i32>,

    /// Pages to jump after page 0
    ///
    /// With any value other than 1 the results of page 0 are not written.
    #[arg(
        long = "page-increment",
        value_name = "N",
        default_value_t = DEFAULT_PAGE_INCREMENT,
        help = "Pages to jump after the first page"
    )]
    pub page_increment: u32,
}

/// Arguments for the fetch command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct FetchArgs {
    /// First year to fetch
    #[arg(value_name = "YEAR")]
    pub year: Option<i32>,

    /// Last year to fetch, inclusive
    #[arg(long = "until", value_name = "YEAR", help = "Last year to fetch (inclusive)")]
    pub until: Option<i32>,

    /// Disable the progress bar
    #[arg(long = "no-progress", help = "Disable the progress bar")]
    pub no_progress: bool,
}

impl GlobalArgs {
    /// Log level derived from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

impl HarvestArgs {
    /// Query and year, or `None` when either is missing
    pub fn positional(&self) -> Option<(&str, i32)> {
        Some((self.query.as_deref()?, self.year?))
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_increment == 0 {
            return Err(Error::configuration(
                "Page increment must be at least 1",
            ));
        }
        Ok(())
    }
}

impl FetchArgs {
    /// Inclusive year range, or `None` when the start year is missing
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let first = self.year?;
        Some((first, self.until.unwrap_or(first)))
    }

    pub fn validate(&self) -> Result<()> {
        if let Some((first, last)) = self.year_range() {
            if last < first {
                return Err(Error::configuration(format!(
                    "Last year {} is before first year {}",
                    last, first
                )));
            }
        }
        Ok(())
    }
}
