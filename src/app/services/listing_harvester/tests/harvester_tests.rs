//! Tests for the harvest loop

use super::*;
use crate::app::services::listing_harvester::ListingHarvester;
use crate::config::Config;
use crate::constants::{LISTING_FIELD_COUNT, LISTING_HEADER};
use std::fs;
use tempfile::TempDir;

fn harvester(temp_dir: &TempDir, portal: FakePortal) -> ListingHarvester<FakePortal> {
    let config = Config::default().with_verdicts_dir(temp_dir.path().join("verdicts"));
    ListingHarvester::new(config, portal)
}

fn listing_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_sequential_walk_writes_every_page() {
    let temp_dir = TempDir::new().unwrap();
    let mut harvester = harvester(&temp_dir, FakePortal::paginated("tar_mi", 3, 2));

    let stats = harvester.harvest("appalt*", 2023, 1).unwrap();

    assert_eq!(stats.pages_visited, vec![0, 1, 2, 3]);
    assert_eq!(stats.total_pages, 3);
    assert_eq!(stats.total_results, 8);
    assert_eq!(stats.records_parsed, 8);
    assert_eq!(stats.records_written, 8);
    assert_eq!(stats.incomplete_records, 0);
    assert_eq!(
        stats.output,
        temp_dir.path().join("verdicts").join("verdicts_2023.csv")
    );

    let lines = listing_lines(&stats.output);
    assert_eq!(lines[0], LISTING_HEADER);
    assert_eq!(lines.len(), 9);
    for line in &lines[1..] {
        assert_eq!(line.split(';').count(), LISTING_FIELD_COUNT);
    }
    assert!(lines[1].starts_with("0;ECLI:IT:TARMI:2023:1SENT;Sentenza n. 1;"));
    assert!(lines[8].starts_with("3;"));
    assert!(lines[8].ends_with(&document_file("tar_mi", 302)));

    let portal = harvester.into_portal();
    assert_eq!(portal.requested_pages(), vec![0, 1, 2, 3]);
    let (request, _) = &portal.requests[0];
    assert_eq!(request.query, "appalt*");
    assert_eq!(request.year, 2023);
    assert_eq!(request.page_size, 20);
}

#[test]
fn test_page_increment_skips_page_zero_records() {
    let temp_dir = TempDir::new().unwrap();
    let mut harvester = harvester(&temp_dir, FakePortal::paginated("tar_rm", 5, 1));

    let stats = harvester.harvest("appalt*", 2022, 3).unwrap();

    assert_eq!(stats.pages_visited, vec![0, 3, 4, 5]);
    assert_eq!(stats.records_parsed, 4);
    assert_eq!(stats.records_written, 3);

    let lines = listing_lines(&stats.output);
    assert_eq!(lines[0], LISTING_HEADER);
    let pages: Vec<&str> = lines[1..]
        .iter()
        .map(|l| l.split(';').next().unwrap())
        .collect();
    assert_eq!(pages, vec!["3", "4", "5"]);
}

#[test]
fn test_single_page_without_pagination() {
    let temp_dir = TempDir::new().unwrap();
    let html = results_page("2", None, &[article("tar_bs", 1), article("tar_bs", 2)]);
    let mut harvester = harvester(&temp_dir, FakePortal::single_page(html));

    let stats = harvester.harvest("rifiuti", 2021, 1).unwrap();

    assert_eq!(stats.pages_visited, vec![0]);
    assert_eq!(stats.total_pages, 0);
    assert_eq!(listing_lines(&stats.output).len(), 3);
}

#[test]
fn test_empty_search_writes_header_only() {
    let temp_dir = TempDir::new().unwrap();
    let portal = FakePortal::single_page(results_page("0", None, &[]));
    let mut harvester = harvester(&temp_dir, portal);

    let stats = harvester.harvest("nothing", 2020, 1).unwrap();

    assert_eq!(stats.records_written, 0);
    assert_eq!(listing_lines(&stats.output), vec![LISTING_HEADER.to_string()]);
}

#[test]
fn test_form_error_aborts_run() {
    let temp_dir = TempDir::new().unwrap();
    let mut portal = FakePortal::paginated("tar_mi", 4, 1);
    portal.fail_on = Some(2);
    let mut harvester = harvester(&temp_dir, portal);

    let err = harvester.harvest("appalt*", 2023, 1).unwrap_err();
    assert!(err.is_markup_change());

    // Rows of the pages before the failure stay, without a header
    let path = harvester.config().listing_path(2023);
    let lines = listing_lines(&path);
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l != LISTING_HEADER));

    assert_eq!(harvester.into_portal().requested_pages(), vec![0, 1, 2]);
}

#[test]
fn test_page_limit_exceeded() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default()
        .with_verdicts_dir(temp_dir.path())
        .with_max_pages(2);
    let mut harvester = ListingHarvester::new(config, FakePortal::paginated("tar_mi", 4, 1));

    let err = harvester.harvest("appalt*", 2023, 1).unwrap_err();
    assert!(matches!(
        err,
        Error::PageLimitExceeded {
            requested: 3,
            limit: 2
        }
    ));
    assert_eq!(harvester.into_portal().requested_pages(), vec![0, 1]);
}

#[test]
fn test_zero_page_increment_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut harvester = harvester(&temp_dir, FakePortal::paginated("tar_mi", 1, 1));

    let err = harvester.harvest("appalt*", 2023, 0).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(harvester.into_portal().requests.is_empty());
}

#[test]
fn test_repeated_run_keeps_single_header() {
    let temp_dir = TempDir::new().unwrap();
    let mut harvester = harvester(&temp_dir, FakePortal::paginated("tar_mi", 1, 1));

    harvester.harvest("appalt*", 2023, 1).unwrap();
    let stats = harvester.harvest("appalt*", 2023, 1).unwrap();

    let lines = listing_lines(&stats.output);
    assert_eq!(lines.iter().filter(|l| *l == LISTING_HEADER).count(), 1);
    assert_eq!(lines[0], LISTING_HEADER);
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_year_directory_created() {
    let temp_dir = TempDir::new().unwrap();
    let mut harvester = harvester(&temp_dir, FakePortal::paginated("tar", 0, 1));

    harvester.harvest("appalt*", 2023, 1).unwrap();

    let year_dir = harvester.config().year_dir(2023);
    assert_eq!(year_dir, temp_dir.path().join("verdicts").join("2023"));
    assert!(year_dir.is_dir());
}
