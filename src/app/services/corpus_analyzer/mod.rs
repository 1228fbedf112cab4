//! Corpus analyzer service
//!
//! Computes one [`StatsRecord`] per year directory under the verdicts root:
//! file count, lowercased extension counts and counts of filenames starting
//! with each known court prefix. Every record is appended to the stats file
//! as soon as it is computed.

use crate::app::models::StatsRecord;
use crate::config::Config;
use crate::constants::HIDDEN_FILE_PREFIX;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub mod courts;
pub mod stats_file;

#[cfg(test)]
pub mod tests;

pub use courts::load_court_prefixes;
pub use stats_file::{append_stats_record, read_stats_records};

/// Immediate subdirectories of `root`, sorted by path
pub fn list_subdirectories(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(root)
        .map_err(|e| Error::io(format!("Failed to list {}", root.display()), e))?;

    let mut directories = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(format!("Failed to list {}", root.display()), e))?;
        let path = entry.path();
        if path.is_dir() {
            directories.push(path);
        }
    }
    directories.sort();
    Ok(directories)
}

/// Statistics of every file below `directory`
///
/// Files whose name starts with `._` are ignored. A file without extension
/// counts under the empty extension. A filename matching several prefixes
/// increments each of them.
pub fn analyze_directory(directory: &Path, court_prefixes: &[String]) -> StatsRecord {
    let mut record = StatsRecord::new(directory.display().to_string());

    for entry in WalkDir::new(directory) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error walking {}: {}", directory.display(), e);
                continue;
            }
        };
        // Symlinked files count, symlinked directories are not descended
        if !entry.path().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with(HIDDEN_FILE_PREFIX) {
            continue;
        }

        let extension = entry
            .path()
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        let matched = court_prefixes
            .iter()
            .filter(|prefix| name.starts_with(prefix.as_str()))
            .map(String::as_str);

        record.add_file(&extension, matched);
    }

    record
}

/// Analyzer over the configured verdicts root
pub struct CorpusAnalyzer {
    config: Config,
}

impl CorpusAnalyzer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Analyze every year directory and append the records to the stats file
    pub fn run(&self) -> Result<Vec<StatsRecord>> {
        let courts = load_court_prefixes(&self.config.courts_path());
        info!("Courts found: {:?}", courts);

        let directories = list_subdirectories(&self.config.verdicts_dir)?;
        info!("Verdict directories found: {}", directories.len());
        debug!("{:?}", directories);

        let stats_path = self.config.stats_path();
        let mut records = Vec::with_capacity(directories.len());

        for directory in directories {
            let record = analyze_directory(&directory, &courts);
            debug!("{:?}", record);
            info!(
                "{}: {} files",
                record.directory_path, record.total_files
            );

            append_stats_record(&stats_path, &record)?;
            records.push(record);
        }

        info!("Results saved in {}", stats_path.display());
        Ok(records)
    }
}
