//! Verdict Scraper Library
//!
//! A Rust library for harvesting administrative-court verdict listings from
//! the public judgment search portal, downloading the referenced documents
//! and computing statistics over the downloaded corpus.
//!
//! The pipeline is made of three sequential stages that hand data over
//! exclusively through files:
//! - Listing harvester: walks the paginated search results and appends one
//!   `;`-delimited row per verdict to a per-year CSV listing
//! - Document fetcher: deduplicates a listing and downloads every document
//!   not already on disk
//! - Corpus analyzer: tallies file extensions and court prefixes per year
//!   directory and appends the results to a JSON array file

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod corpus_analyzer;
        pub mod document_fetcher;
        pub mod listing_harvester;
        pub mod portal;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{StatsRecord, VerdictField, VerdictRecord};
pub use config::Config;

/// Result type alias for the verdict scraper
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for harvesting, fetching and analysis operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing error
    #[error("CSV error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// A listing file lacks a column the stage needs
    #[error("Missing column '{column}' in file '{file}'")]
    MissingColumn { file: String, column: String },

    /// HTTP request failed
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The search form is not present on the current page
    #[error("Form not found: '{form}' on {url}")]
    FormNotFound { form: String, url: String },

    /// The search form lacks an expected field
    #[error("Form field not found: '{field}' in form '{form}'")]
    FormFieldNotFound { form: String, field: String },

    /// A navigation link is not present on the current page
    #[error("Link not found: '{link}' on {url}")]
    LinkNotFound { link: String, url: String },

    /// The harvest would request more pages than allowed
    #[error("Page limit exceeded: {requested} pages requested, limit is {limit}")]
    PageLimitExceeded { requested: u32, limit: u32 },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON serialization error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a missing column error
    pub fn missing_column(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            file: file.into(),
            column: column.into(),
        }
    }

    /// Create an HTTP error with context
    pub fn http(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            message: message.into(),
            source,
        }
    }

    /// Create a form not found error
    pub fn form_not_found(form: impl Into<String>, url: impl Into<String>) -> Self {
        Self::FormNotFound {
            form: form.into(),
            url: url.into(),
        }
    }

    /// Create a form field not found error
    pub fn form_field_not_found(form: impl Into<String>, field: impl Into<String>) -> Self {
        Self::FormFieldNotFound {
            form: form.into(),
            field: field.into(),
        }
    }

    /// Create a link not found error
    pub fn link_not_found(link: impl Into<String>, url: impl Into<String>) -> Self {
        Self::LinkNotFound {
            link: link.into(),
            url: url.into(),
        }
    }

    /// Create a page limit exceeded error
    pub fn page_limit_exceeded(requested: u32, limit: u32) -> Self {
        Self::PageLimitExceeded { requested, limit }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// True when the error means the portal markup no longer matches
    pub fn is_markup_change(&self) -> bool {
        matches!(
            self,
            Self::FormNotFound { .. } | Self::FormFieldNotFound { .. } | Self::LinkNotFound { .. }
        )
    }
}
