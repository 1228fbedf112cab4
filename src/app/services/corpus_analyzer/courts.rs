//! Court reference list

use std::path::Path;
use tracing::{debug, warn};

/// Court prefixes from the first column of the reference CSV
///
/// The first row is a header. A missing or unreadable file is logged and
/// yields an empty list, so the analysis still runs with no court counts.
pub fn load_court_prefixes(path: &Path) -> Vec<String> {
    if !path.exists() {
        warn!("Court file not found: {}", path.display());
        return Vec::new();
    }

    let mut reader = match csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
    {
        Ok(reader) => reader,
        Err(e) => {
            warn!("Failed to open court file {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let mut prefixes = Vec::new();
    for (line, row) in reader.records().enumerate() {
        match row {
            Ok(row) => {
                if let Some(prefix) = row.get(0).filter(|p| !p.is_empty()) {
                    prefixes.push(prefix.to_string());
                }
            }
            Err(e) => {
                warn!(
                    "Failed to read court file {} at row {}: {}",
                    path.display(),
                    line + 2,
                    e
                );
                return Vec::new();
            }
        }
    }

    debug!("Loaded {} court prefixes from {}", prefixes.len(), path.display());
    prefixes
}
