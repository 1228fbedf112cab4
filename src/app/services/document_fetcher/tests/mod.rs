//! Tests for the document fetcher
//!
//! Listings are written to a temporary verdicts directory and documents are
//! served by [`FakeSource`].

pub mod listing_tests;

use crate::app::services::document_fetcher::DocumentSource;
use crate::constants::LISTING_HEADER;
use crate::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Document URL for listing row `n`
pub fn url(n: u32) -> String {
    format!("https://example.org/visualizza?nodeRef=&schema=tar_mi&nrg={n}&nomeFile={n}_01.html&subDir=Provvedimenti")
}

/// Listing row `n` on `page`
pub fn row(page: u32, n: u32) -> String {
    format!(
        "{page};n.d.;Sentenza {n};Sentenza;{n};tar_mi;Milano;Sezione 1;{n};{};tar_mi_{n}_01.html",
        url(n)
    )
}

/// Write a listing file with header and the given rows
pub fn write_listing(path: &Path, rows: &[String]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut content = format!("{}\n", LISTING_HEADER);
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(path, content).unwrap();
}

/// In-memory document source returning the URL as body
#[derive(Default)]
pub struct FakeSource {
    /// URLs answered with an error status
    pub failing: HashSet<String>,
    /// Every URL requested, in order
    pub requested: Vec<String>,
}

impl FakeSource {
    pub fn failing_on(urls: &[String]) -> Self {
        Self {
            failing: urls.iter().cloned().collect(),
            ..Default::default()
        }
    }
}

impl DocumentSource for FakeSource {
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>> {
        self.requested.push(url.to_string());
        if self.failing.contains(url) {
            return Err(Error::io(
                format!("Failed to download {}", url),
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "404 Not Found"),
            ));
        }
        Ok(format!("<html>{}</html>", url).into_bytes())
    }
}
