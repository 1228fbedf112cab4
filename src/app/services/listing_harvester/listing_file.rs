//! Year-scoped listing file
//!
//! Rows are appended page by page while the harvest runs, so an interrupted
//! run leaves a usable partial file. The header is only written once the
//! walk is complete, by rewriting the whole file through a temporary file in
//! the same directory and atomically replacing the original.

use crate::app::models::VerdictRecord;
use crate::constants::{LISTING_DELIMITER, LISTING_HEADER};
use crate::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Listing CSV for one year
#[derive(Debug, Clone)]
pub struct ListingFile {
    path: PathBuf,
}

impl ListingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the records of one page, each row prefixed with the page index
    ///
    /// Returns the number of rows written.
    pub fn append_page(&self, page: u32, records: &[VerdictRecord]) -> Result<usize> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                Error::io(
                    format!("Failed to open listing {}", self.path.display()),
                    e,
                )
            })?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(LISTING_DELIMITER)
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        let page = page.to_string();
        for record in records {
            let fields = record.csv_fields();
            writer
                .write_record(std::iter::once(page.as_str()).chain(fields.iter().map(String::as_str)))
                .map_err(|e| self.csv_error("Failed to write listing row", e))?;
        }
        writer.flush().map_err(|e| {
            Error::io(
                format!("Failed to flush listing {}", self.path.display()),
                e,
            )
        })?;

        debug!(
            "Appended {} rows for page {} to {}",
            records.len(),
            page,
            self.path.display()
        );
        Ok(records.len())
    }

    /// Prepend the header row, replacing the file atomically
    ///
    /// Header rows left in the body by an earlier completed run are dropped,
    /// so the file always ends up with exactly one header on its first line.
    /// A missing file becomes a header-only listing.
    pub fn finalize(&self) -> Result<()> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(Error::io(
                    format!("Failed to read listing {}", self.path.display()),
                    e,
                ));
            }
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| {
            Error::io(
                format!("Failed to create temporary file in {}", dir.display()),
                e,
            )
        })?;

        writeln!(temp, "{}", LISTING_HEADER)
            .map_err(|e| Error::io("Failed to write listing header", e))?;
        for line in content.lines().filter(|line| *line != LISTING_HEADER) {
            writeln!(temp, "{}", line)
                .map_err(|e| Error::io("Failed to copy listing rows", e))?;
        }
        temp.flush()
            .map_err(|e| Error::io("Failed to flush temporary listing", e))?;

        temp.persist(&self.path).map_err(|e| {
            Error::io(
                format!("Failed to replace listing {}", self.path.display()),
                e.error,
            )
        })?;

        debug!("Header added to {}", self.path.display());
        Ok(())
    }

    fn csv_error(&self, message: &str, source: csv::Error) -> Error {
        Error::csv_parsing(self.path.display().to_string(), message, Some(source))
    }
}
