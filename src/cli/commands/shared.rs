//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, directory preparation and the
//! start/end banners printed by every command.

use crate::cli::args::GlobalArgs;
use crate::config::Config;
use crate::{Error, Result};
use chrono::{DateTime, Local};
use colored::*;
use indicatif::HumanDuration;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Set up structured logging
///
/// `RUST_LOG` wins over the verbosity flags.
pub fn setup_logging(args: &GlobalArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("verdict_scraper={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load and validate the configuration
pub fn load_configuration(args: &GlobalArgs) -> Result<Config> {
    info!("Loading configuration");
    let config = Config::load_layered(args.config_file.as_deref())?;
    config.validate()?;
    Ok(config)
}

/// Create a directory and its parents if missing
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        info!("Creating directory {}", path.display());
        std::fs::create_dir_all(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
    }
    Ok(())
}

/// Print usage for a command invoked without its positional arguments
pub fn print_usage(usage: &str, example: &str) {
    println!("{}", "Missing arguments".yellow().bold());
    println!("Usage:   {}", usage);
    println!("Example: {}", example);
}

/// Start/end banner of a command run
pub struct RunBanner {
    name: &'static str,
    started_at: DateTime<Local>,
    started: Instant,
    quiet: bool,
}

impl RunBanner {
    /// Print the start banner
    pub fn start(name: &'static str, quiet: bool) -> Self {
        let banner = Self {
            name,
            started_at: Local::now(),
            started: Instant::now(),
            quiet,
        };

        if !quiet {
            println!();
            println!("{}", format!("*** {} START ***", name.to_uppercase()).bright_green().bold());
            println!("Start process: {}", banner.started_at.format("%Y-%m-%d %H:%M:%S"));
            println!();
        }
        banner
    }

    /// Print a labelled summary line
    pub fn line(&self, label: &str, value: impl std::fmt::Display) {
        if !self.quiet {
            println!("   • {}: {}", label, value.to_string().bright_yellow());
        }
    }

    /// Print the end banner with the elapsed time
    pub fn finish(self) {
        if self.quiet {
            return;
        }
        println!();
        println!("End process: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!("Time to finish: {}", HumanDuration(self.started.elapsed()));
        println!("{}", format!("*** {} END ***", self.name.to_uppercase()).bright_green().bold());
        println!();
    }
}
