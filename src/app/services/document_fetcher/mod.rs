//! Document fetcher service
//!
//! Reads the listing of a year, drops duplicate rows and downloads every
//! document not yet present under `{verdicts_dir}/{year}/`. A failed
//! download is logged and counted; it never stops the batch.

use crate::config::Config;
use crate::{Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

pub mod listing;
pub mod progress;
pub mod source;

#[cfg(test)]
pub mod tests;

pub use listing::{DocumentListing, ListingEntry};
pub use progress::DownloadProgress;
pub use source::{DocumentSource, HttpDocumentSource};

/// Counters of one or more fetch runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Unique rows considered
    pub processed: usize,
    /// Documents written by this run
    pub downloaded: usize,
    /// Documents found on disk and left untouched
    pub already_present: usize,
    /// Documents that could not be downloaded or written
    pub failed: usize,
    /// Rows dropped as duplicates
    pub duplicates_removed: usize,
    /// One message per failure
    pub failures: Vec<String>,
}

impl FetchStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_failure(&mut self, message: String) {
        self.failed += 1;
        self.failures.push(message);
    }

    /// Add the counters of another run
    pub fn merge(&mut self, other: &FetchStats) {
        self.processed += other.processed;
        self.downloaded += other.downloaded;
        self.already_present += other.already_present;
        self.failed += other.failed;
        self.duplicates_removed += other.duplicates_removed;
        self.failures.extend(other.failures.iter().cloned());
    }

    /// Check if every row ended with the document on disk
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Destination of a listing entry inside `year_dir`
///
/// `None` when the URL is blank or the filename is not a single plain path
/// component, as left by a truncated row or a hostile listing.
pub fn document_path(year_dir: &Path, entry: &ListingEntry) -> Option<PathBuf> {
    if entry.url.trim().is_empty() {
        return None;
    }
    let mut components = Path::new(&entry.filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => Some(year_dir.join(name)),
        _ => None,
    }
}

/// Fetcher downloading the documents of a listing through a [`DocumentSource`]
pub struct DocumentFetcher<S: DocumentSource> {
    config: Config,
    source: S,
    show_progress: bool,
}

impl<S: DocumentSource> DocumentFetcher<S> {
    pub fn new(config: Config, source: S) -> Self {
        Self {
            config,
            source,
            show_progress: false,
        }
    }

    /// Draw a progress bar while downloading
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Download the documents listed for `year`
    pub fn fetch_year(&mut self, year: i32) -> Result<FetchStats> {
        let listing = DocumentListing::load(&self.config.listing_path(year))?;
        listing.log_preview();

        info!(
            "{} documents listed for {} ({} duplicates removed)",
            listing.len(),
            year,
            listing.duplicates_removed
        );

        let year_dir = self.config.year_dir(year);
        fs::create_dir_all(&year_dir)
            .map_err(|e| Error::io(format!("Failed to create {}", year_dir.display()), e))?;

        let mut stats = FetchStats {
            duplicates_removed: listing.duplicates_removed,
            ..FetchStats::new()
        };

        let progress = if self.show_progress {
            DownloadProgress::new(listing.len(), year)
        } else {
            DownloadProgress::hidden()
        };

        for entry in &listing.entries {
            stats.processed += 1;
            let Some(destination) = document_path(&year_dir, entry) else {
                warn!(
                    "Skipping unusable listing row: url '{}', file '{}'",
                    entry.url, entry.filename
                );
                stats.add_failure(format!(
                    "invalid row: url '{}', file '{}'",
                    entry.url, entry.filename
                ));
                progress.increment();
                continue;
            };

            if destination.exists() {
                debug!("Already present: {}", destination.display());
                stats.already_present += 1;
                progress.increment();
                continue;
            }

            progress.set_message(&entry.filename);
            match self.download(&entry.url, &destination) {
                Ok(bytes) => {
                    debug!("Downloaded {} ({} bytes)", destination.display(), bytes);
                    stats.downloaded += 1;
                }
                Err(e) => {
                    warn!("Failed to fetch {}: {}", entry.url, e);
                    progress.println(&format!("Failed: {}", entry.filename));
                    stats.add_failure(format!("{}: {}", entry.url, e));
                }
            }
            progress.increment();
        }

        progress.finish(format!(
            "{}: {} downloaded, {} present, {} failed",
            year, stats.downloaded, stats.already_present, stats.failed
        ));
        info!(
            "Year {}: {} downloaded, {} already present, {} failed",
            year, stats.downloaded, stats.already_present, stats.failed
        );
        Ok(stats)
    }

    /// Download every year of an inclusive range, adding up the counters
    pub fn fetch_years(&mut self, first: i32, last: i32) -> Result<FetchStats> {
        let mut total = FetchStats::new();
        for year in first..=last {
            let stats = self.fetch_year(year)?;
            total.merge(&stats);
        }
        Ok(total)
    }

    fn download(&mut self, url: &str, destination: &Path) -> Result<usize> {
        let body = self.source.fetch(url)?;
        fs::write(destination, &body)
            .map_err(|e| Error::io(format!("Failed to write {}", destination.display()), e))?;
        Ok(body.len())
    }

    /// Consume the fetcher and return its source
    pub fn into_source(self) -> S {
        self.source
    }
}
