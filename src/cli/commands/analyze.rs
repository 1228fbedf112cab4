//! Analyze command: year directories to stats records

use super::shared::{RunBanner, ensure_directory};
use crate::Result;
use crate::app::services::corpus_analyzer::CorpusAnalyzer;
use crate::config::Config;

pub fn run_analyze(config: &Config, quiet: bool) -> Result<()> {
    let banner = RunBanner::start("analyze", quiet);

    ensure_directory(&config.stats_dir)?;

    let records = CorpusAnalyzer::new(config.clone()).run()?;

    for record in &records {
        banner.line(&record.directory_path, format!("{} files", record.total_files));
    }
    banner.line("Stats file", config.stats_path().display());
    banner.finish();
    Ok(())
}
