//! Listing harvester service
//!
//! Walks the paginated search results for one query and year and appends
//! one listing row per verdict to the year's CSV file.
//!
//! The walk is an explicit loop over [`PaginationState`]: page 0 resolves
//! the result and page totals, every page is parsed and its records appended
//! as soon as it arrives, and the header is prepended once the last page has
//! been written. A run requesting more pages than `max_pages` aborts.

use crate::app::services::portal::{SearchPortal, SearchRequest};
use crate::config::Config;
use crate::{Error, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

pub mod listing_file;
pub mod page_parser;
pub mod pagination;

#[cfg(test)]
pub mod tests;

pub use listing_file::ListingFile;
pub use page_parser::{LastPage, PageParser, RecordExtraction, ResultsPage};
pub use pagination::PaginationState;

/// Outcome of one harvest run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestStats {
    /// Listing file written by the run
    pub output: PathBuf,
    /// Results reported by the portal
    pub total_results: u64,
    /// Last page index reported by the portal
    pub total_pages: u32,
    /// Page indices requested, in order
    pub pages_visited: Vec<u32>,
    /// Records parsed across all pages
    pub records_parsed: u64,
    /// Rows appended to the listing
    pub records_written: usize,
    /// Records with at least one field missing
    pub incomplete_records: usize,
}

impl HarvestStats {
    fn new(output: PathBuf) -> Self {
        Self {
            output,
            total_results: 0,
            total_pages: 0,
            pages_visited: Vec::new(),
            records_parsed: 0,
            records_written: 0,
            incomplete_records: 0,
        }
    }
}

/// Harvester driving a [`SearchPortal`] page by page
pub struct ListingHarvester<P: SearchPortal> {
    config: Config,
    portal: P,
    parser: PageParser,
}

impl<P: SearchPortal> ListingHarvester<P> {
    pub fn new(config: Config, portal: P) -> Self {
        Self {
            config,
            portal,
            parser: PageParser::new(),
        }
    }

    /// Harvest every result page of `query` for `year`
    ///
    /// `page_increment` is the jump applied after page 0; with any value
    /// other than 1 the records of page 0 are not written.
    pub fn harvest(&mut self, query: &str, year: i32, page_increment: u32) -> Result<HarvestStats> {
        if page_increment == 0 {
            return Err(Error::configuration("Page increment must be at least 1"));
        }

        let listing = ListingFile::new(self.config.listing_path(year));
        if let Some(parent) = listing.path().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::io(format!("Failed to create {}", parent.display()), e)
                })?;
            }
        }

        let year_dir = self.config.year_dir(year);
        fs::create_dir_all(&year_dir)
            .map_err(|e| Error::io(format!("Failed to create {}", year_dir.display()), e))?;

        let request = SearchRequest::new(query, year, &self.config);
        let mut state = PaginationState::new(page_increment);
        let mut stats = HarvestStats::new(listing.path().to_path_buf());

        info!("Harvesting '{}' for {} into {}", query, year, listing.path().display());

        loop {
            if stats.pages_visited.len() as u32 >= self.config.max_pages {
                return Err(Error::page_limit_exceeded(
                    stats.pages_visited.len() as u32 + 1,
                    self.config.max_pages,
                ));
            }

            let html = self.portal.fetch_page(&request, state.page)?;
            stats.pages_visited.push(state.page);
            let page = self.parser.parse(&html);

            if !state.is_resolved() {
                state.resolve(page.total_results, &page.last_page);
                info!("Results found: {}", state.total_results);
                info!("Paging: {}", self.config.paging);
                info!("Page shift: {}", state.page_increment);
                info!("Total pages to parse: {}", state.total_pages);
            }

            state.record_page(page.records.len());
            stats.records_parsed += page.records.len() as u64;
            debug!("Articles on page {}: {}", state.page, state.local_count);

            for extraction in page.records.iter().filter(|e| !e.is_complete()) {
                stats.incomplete_records += 1;
                debug!(
                    "Record without {:?}: {}",
                    extraction.missing,
                    extraction.record.url.as_deref().unwrap_or("<no url>")
                );
            }

            if state.keeps_current_page() {
                let records: Vec<_> = page.records.into_iter().map(|e| e.record).collect();
                stats.records_written += listing.append_page(state.page, &records)?;
            } else {
                debug!("Skipping records of page {}", state.page);
            }

            info!(
                "Page {}/{}: {} articles, {} in total",
                state.page, state.total_pages, state.local_count, state.global_count
            );

            if state.advance().is_none() {
                break;
            }
        }

        listing.finalize()?;

        stats.total_results = state.total_results;
        stats.total_pages = state.total_pages;
        info!(
            "Harvest of {} finished: {} rows in {}",
            year,
            stats.records_written,
            listing.path().display()
        );
        Ok(stats)
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the harvester and return its portal
    pub fn into_portal(self) -> P {
        self.portal
    }
}
