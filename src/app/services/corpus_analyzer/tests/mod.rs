//! Tests for the corpus analyzer

pub mod stats_file_tests;

use crate::app::models::StatsRecord;
use std::fs;
use std::path::Path;

/// Create empty files below `dir`, creating subdirectories as needed
pub fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }
}

pub fn courts() -> Vec<String> {
    vec!["tar_mi".to_string(), "tar".to_string(), "cds".to_string()]
}

pub fn sample_record(dir: &str, files: usize) -> StatsRecord {
    let mut record = StatsRecord::new(dir);
    for _ in 0..files {
        record.add_file("pdf", ["tar"]);
    }
    record
}
