//! Tests for the stats JSON file

use super::*;
use crate::app::services::corpus_analyzer::{append_stats_record, read_stats_records};
use tempfile::TempDir;

#[test]
fn test_append_creates_file_and_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stats").join("verdicts_stats.json");

    append_stats_record(&path, &sample_record("verdicts/2022", 1)).unwrap();
    append_stats_record(&path, &sample_record("verdicts/2023", 2)).unwrap();

    let records = read_stats_records(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].directory_path, "verdicts/2022");
    assert_eq!(records[1].total_files, 2);
}

#[test]
fn test_four_space_indentation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stats.json");
    append_stats_record(&path, &sample_record("verdicts/2023", 1)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("[\n    {\n        \"directory_path\": \"verdicts/2023\""));
}

#[test]
fn test_empty_or_corrupt_file_starts_new_array() {
    let temp_dir = TempDir::new().unwrap();

    let empty = temp_dir.path().join("empty.json");
    fs::write(&empty, "").unwrap();
    append_stats_record(&empty, &sample_record("a", 1)).unwrap();
    assert_eq!(read_stats_records(&empty).unwrap().len(), 1);

    let corrupt = temp_dir.path().join("corrupt.json");
    fs::write(&corrupt, "[{\"directory_path\": ").unwrap();
    append_stats_record(&corrupt, &sample_record("b", 1)).unwrap();
    assert_eq!(read_stats_records(&corrupt).unwrap().len(), 1);
}

#[test]
fn test_non_array_document_replaced() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stats.json");
    fs::write(&path, "{\"directory_path\": \"old\"}").unwrap();

    append_stats_record(&path, &sample_record("new", 1)).unwrap();

    let records = read_stats_records(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].directory_path, "new");
}

#[test]
fn test_key_order_kept_across_appends() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stats.json");
    append_stats_record(&path, &sample_record("verdicts/2022", 1)).unwrap();
    append_stats_record(&path, &sample_record("verdicts/2023", 1)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    for object in content.split("\"directory_path\"").skip(1) {
        let total = object.find("\"total_files\"").unwrap();
        let extensions = object.find("\"extensions\"").unwrap();
        let courts = object.find("\"court_counts\"").unwrap();
        assert!(extensions < courts && courts < total);
    }
    assert_eq!(content.matches("\"directory_path\"").count(), 2);
}

#[test]
fn test_non_utf8_file_starts_new_array() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stats.json");
    fs::write(&path, [0xff, 0xfe, 0x00, b'[']).unwrap();

    append_stats_record(&path, &sample_record("verdicts/2023", 1)).unwrap();

    let records = read_stats_records(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].directory_path, "verdicts/2023");
}
