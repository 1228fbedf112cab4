//! Listing loader for the fetch stage
//!
//! Only the URL and filename columns of a listing are read. Rows repeated
//! across pages (a resumed harvest appends the same page twice) collapse to
//! their first occurrence.

use crate::constants::{LISTING_DELIMITER, columns};
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One document to fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingEntry {
    pub url: String,
    pub filename: String,
}

/// Deduplicated content of a listing file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentListing {
    pub path: PathBuf,
    /// Unique entries in file order
    pub entries: Vec<ListingEntry>,
    /// Rows dropped as exact duplicates
    pub duplicates_removed: usize,
}

impl DocumentListing {
    /// Load a listing and drop duplicate rows
    ///
    /// The file must have a header naming the URL and filename columns.
    pub fn load(path: &Path) -> Result<Self> {
        let file_name = path.display().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(LISTING_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| Error::csv_parsing(&file_name, "Failed to open listing", Some(e)))?;

        let headers = reader
            .headers()
            .map_err(|e| Error::csv_parsing(&file_name, "Failed to read listing header", Some(e)))?
            .clone();
        let url_index = column_index(&headers, columns::URL)
            .ok_or_else(|| Error::missing_column(&file_name, columns::URL))?;
        let file_index = column_index(&headers, columns::FILE)
            .ok_or_else(|| Error::missing_column(&file_name, columns::FILE))?;

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let mut duplicates_removed = 0;

        for (line, row) in reader.records().enumerate() {
            let row = row.map_err(|e| {
                Error::csv_parsing(&file_name, format!("Invalid row {}", line + 2), Some(e))
            })?;

            let entry = ListingEntry {
                url: row.get(url_index).unwrap_or_default().to_string(),
                filename: row.get(file_index).unwrap_or_default().to_string(),
            };

            if seen.insert(entry.clone()) {
                entries.push(entry);
            } else {
                duplicates_removed += 1;
            }
        }

        debug!(
            "Loaded {} unique rows from {} ({} duplicates)",
            entries.len(),
            file_name,
            duplicates_removed
        );

        Ok(Self {
            path: path.to_path_buf(),
            entries,
            duplicates_removed,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Log a short preview of the table
    pub fn log_preview(&self) {
        debug!("{}: {} rows", self.path.display(), self.entries.len());
        let head = self.entries.iter().take(3);
        let tail = self.entries.iter().skip(3.max(self.entries.len().saturating_sub(2)));
        for entry in head.chain(tail) {
            debug!("  {} -> {}", entry.filename, entry.url);
        }
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}
