//! Download progress reporting

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Progress bar over the rows of one listing, disabled when hidden
pub struct DownloadProgress {
    progress_bar: Option<ProgressBar>,
}

impl DownloadProgress {
    /// Reporter that draws nothing
    pub fn hidden() -> Self {
        Self { progress_bar: None }
    }

    /// Reporter with a bar sized to `total` documents
    pub fn new(total: usize, year: i32) -> Self {
        let pb = ProgressBar::new(total as u64);
        // Template is a constant
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) | {msg}")
                .unwrap()
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        pb.set_message(format!("Fetching {}", year));

        debug!("Progress bar initialized for {} documents", total);
        Self {
            progress_bar: Some(pb),
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    pub fn increment(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
    }

    /// Print a line above the bar, or nothing when hidden
    pub fn println(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.println(message);
        }
    }

    pub fn finish(&self, message: String) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message);
        }
    }
}
