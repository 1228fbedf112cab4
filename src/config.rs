//! Configuration management and validation.
//!
//! Provides the configuration structure shared by the three pipeline
//! stages, its YAML loading with a layered lookup, and the path helpers
//! deriving listing, year, stats and court-reference locations.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_COURTS_DIR, DEFAULT_COURTS_FILE,
    DEFAULT_DECISION_TYPE, DEFAULT_MAX_PAGES, DEFAULT_PAGING, DEFAULT_SEARCH_LINK,
    DEFAULT_SEARCH_URL, DEFAULT_STATS_DIR, DEFAULT_STATS_FILE, DEFAULT_VERDICTS_DIR,
    DEFAULT_VERDICTS_FILE, YEAR_TOKEN,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Global configuration for the verdict pipeline
///
/// Keys may be written either in snake_case or with the upper-case names
/// used by existing `config.yml` files (`VERDICTS_DIR`, `PAGING`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the per-year listings and document folders
    #[serde(alias = "VERDICTS_DIR")]
    pub verdicts_dir: PathBuf,

    /// Listing filename template; every `Y` is replaced by the year
    #[serde(alias = "VERDICTS_FILE")]
    pub verdicts_file: String,

    /// Number of results requested per page
    #[serde(alias = "PAGING")]
    pub paging: u32,

    /// Landing page of the search portal
    #[serde(alias = "URL_SEARCH")]
    pub search_url: String,

    /// Navigation link followed from the landing page to the search form
    #[serde(alias = "SEARCH_LINK")]
    pub search_link: String,

    /// Decision type filter submitted with every search
    #[serde(alias = "DECISION_TYPE")]
    pub decision_type: String,

    /// Maximum number of pages a single harvest run may request
    #[serde(alias = "RECURSION_LIMIT")]
    pub max_pages: u32,

    /// Directory of the statistics file
    #[serde(alias = "VERDICTS_STATS")]
    pub stats_dir: PathBuf,

    /// Statistics filename
    #[serde(alias = "VERDICTS_STATS_FILE")]
    pub stats_file: String,

    /// Directory of the court reference list
    #[serde(alias = "COURTS_DIR")]
    pub courts_dir: PathBuf,

    /// Court reference list filename
    #[serde(alias = "COURTS_FILE")]
    pub courts_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verdicts_dir: PathBuf::from(DEFAULT_VERDICTS_DIR),
            verdicts_file: DEFAULT_VERDICTS_FILE.to_string(),
            paging: DEFAULT_PAGING,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            search_link: DEFAULT_SEARCH_LINK.to_string(),
            decision_type: DEFAULT_DECISION_TYPE.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            stats_dir: PathBuf::from(DEFAULT_STATS_DIR),
            stats_file: DEFAULT_STATS_FILE.to_string(),
            courts_dir: PathBuf::from(DEFAULT_COURTS_DIR),
            courts_file: DEFAULT_COURTS_FILE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            Error::Configuration { message } => Error::configuration(format!(
                "{} ({})",
                message,
                path.display()
            )),
            other => other,
        })
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid YAML configuration: {}", e)))
    }

    /// Default location of the per-user configuration file
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Resolve configuration with a layered lookup
    ///
    /// Order: explicit file, `./config.yml`, user config directory, defaults.
    /// An explicit file that does not exist is an error; the implicit
    /// locations are skipped silently.
    pub fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            info!("Using config file: {}", path.display());
            return Self::from_file(path);
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            info!("Using config file: {}", local.display());
            return Self::from_file(&local);
        }

        if let Ok(user) = Self::default_config_path() {
            if user.exists() {
                info!("Using config file: {}", user.display());
                return Self::from_file(&user);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.paging == 0 {
            return Err(Error::configuration("Paging must be greater than 0"));
        }

        if self.max_pages == 0 {
            return Err(Error::configuration("Page limit must be greater than 0"));
        }

        if self.search_url.trim().is_empty() {
            return Err(Error::configuration("Search URL must not be empty"));
        }

        if !self.verdicts_file.contains(YEAR_TOKEN) {
            return Err(Error::configuration(format!(
                "Listing filename template '{}' must contain the year token '{}'",
                self.verdicts_file, YEAR_TOKEN
            )));
        }

        if self.stats_file.trim().is_empty() || self.courts_file.trim().is_empty() {
            return Err(Error::configuration(
                "Stats and courts filenames must not be empty",
            ));
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }

    /// Listing filename for a year
    pub fn listing_file_name(&self, year: i32) -> String {
        self.verdicts_file.replace(YEAR_TOKEN, &year.to_string())
    }

    /// Full path of the listing file for a year
    pub fn listing_path(&self, year: i32) -> PathBuf {
        self.verdicts_dir.join(self.listing_file_name(year))
    }

    /// Folder receiving the documents downloaded for a year
    pub fn year_dir(&self, year: i32) -> PathBuf {
        self.verdicts_dir.join(year.to_string())
    }

    /// Full path of the statistics file
    pub fn stats_path(&self) -> PathBuf {
        self.stats_dir.join(&self.stats_file)
    }

    /// Full path of the court reference list
    pub fn courts_path(&self) -> PathBuf {
        self.courts_dir.join(&self.courts_file)
    }

    /// Create configuration with a custom verdicts directory
    pub fn with_verdicts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.verdicts_dir = dir.into();
        self
    }

    /// Create configuration with a custom page size
    pub fn with_paging(mut self, paging: u32) -> Self {
        self.paging = paging;
        self
    }

    /// Create configuration with a custom page limit
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Create configuration with custom stats location
    pub fn with_stats(mut self, dir: impl Into<PathBuf>, file: impl Into<String>) -> Self {
        self.stats_dir = dir.into();
        self.stats_file = file.into();
        self
    }

    /// Create configuration with custom court reference location
    pub fn with_courts(mut self, dir: impl Into<PathBuf>, file: impl Into<String>) -> Self {
        self.courts_dir = dir.into();
        self.courts_file = file.into();
        self
    }
}
