//! Fetch command: yearly listings to downloaded documents

use super::shared::{RunBanner, ensure_directory, print_usage};
use crate::Result;
use crate::app::services::document_fetcher::{DocumentFetcher, HttpDocumentSource};
use crate::cli::args::FetchArgs;
use crate::config::Config;

const USAGE: &str = "verdict-scraper fetch <YEAR> [--until YEAR] [--no-progress]";
const EXAMPLE: &str = "verdict-scraper fetch 2023";

pub fn run_fetch(args: &FetchArgs, config: &Config, quiet: bool) -> Result<()> {
    let Some((first, last)) = args.year_range() else {
        print_usage(USAGE, EXAMPLE);
        return Ok(());
    };
    args.validate()?;

    let banner = RunBanner::start("fetch", quiet);
    banner.line("Years", format!("{}..={}", first, last));

    ensure_directory(&config.verdicts_dir)?;

    let source = HttpDocumentSource::new()?;
    let mut fetcher =
        DocumentFetcher::new(config.clone(), source).with_progress(!args.no_progress && !quiet);
    let stats = fetcher.fetch_years(first, last)?;

    banner.line("Documents listed", stats.processed);
    banner.line("Duplicates removed", stats.duplicates_removed);
    banner.line("Downloaded", stats.downloaded);
    banner.line("Already present", stats.already_present);
    banner.line("Failed", stats.failed);
    banner.finish();
    Ok(())
}
