//! Tests for listing loading and deduplication

use super::*;
use crate::app::services::document_fetcher::DocumentListing;
use tempfile::TempDir;

#[test]
fn test_duplicates_removed_keep_first_occurrence() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("verdicts_2023.csv");
    // Page 1 harvested twice
    write_listing(
        &path,
        &[row(0, 1), row(1, 2), row(1, 3), row(1, 2), row(1, 3)],
    );

    let listing = DocumentListing::load(&path).unwrap();

    assert_eq!(listing.len(), 3);
    assert_eq!(listing.duplicates_removed, 2);
    let files: Vec<&str> = listing.entries.iter().map(|e| e.filename.as_str()).collect();
    assert_eq!(files, vec!["tar_mi_1_01.html", "tar_mi_2_01.html", "tar_mi_3_01.html"]);
    assert_eq!(listing.entries[0].url, url(1));
}

#[test]
fn test_rows_differing_only_outside_loaded_columns_are_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("verdicts_2023.csv");
    // Same document listed on two different pages
    write_listing(&path, &[row(2, 5), row(3, 5)]);

    let listing = DocumentListing::load(&path).unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing.duplicates_removed, 1);
}

#[test]
fn test_quoted_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("verdicts_2023.csv");
    let quoted = row(0, 9).replace("Sentenza 9", "\"Appalti; servizi\"");
    write_listing(&path, &[quoted]);

    let listing = DocumentListing::load(&path).unwrap();
    assert_eq!(listing.entries[0].filename, "tar_mi_9_01.html");
}
