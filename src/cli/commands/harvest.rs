//! Harvest command: search results to yearly listing

use super::shared::{RunBanner, ensure_directory, print_usage};
use crate::Result;
use crate::app::services::listing_harvester::ListingHarvester;
use crate::app::services::portal::LivePortal;
use crate::cli::args::HarvestArgs;
use crate::config::Config;
use tracing::info;

const USAGE: &str = "verdict-scraper harvest <QUERY> <YEAR> [--page-increment N]";
const EXAMPLE: &str = "verdict-scraper harvest \"appalt*\" 2023";

pub fn run_harvest(args: &HarvestArgs, config: &Config, quiet: bool) -> Result<()> {
    let Some((query, year)) = args.positional() else {
        print_usage(USAGE, EXAMPLE);
        return Ok(());
    };
    args.validate()?;

    let banner = RunBanner::start("harvest", quiet);
    banner.line("Query", query);
    banner.line("Year", year);

    ensure_directory(&config.verdicts_dir)?;

    info!("Opening search portal {}", config.search_url);
    let portal = LivePortal::connect(config)?;
    let mut harvester = ListingHarvester::new(config.clone(), portal);
    let stats = harvester.harvest(query, year, args.page_increment)?;

    banner.line("Results found", stats.total_results);
    banner.line("Pages visited", stats.pages_visited.len());
    banner.line("Rows written", stats.records_written);
    if stats.incomplete_records > 0 {
        banner.line("Rows with missing fields", stats.incomplete_records);
    }
    banner.line("Listing", stats.output.display());
    banner.finish();
    Ok(())
}
