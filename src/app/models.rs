//! Data models for verdict harvesting and corpus analysis
//!
//! This module contains the record extracted from one search result and the
//! statistics record produced for one directory of downloaded documents.

use crate::constants::{COMPLAINT_QUERY_PARAM, or_not_available};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Verdict Record
// =============================================================================

/// One verdict as extracted from a search result container
///
/// Every field is optional: the upstream markup carries no stable keys and
/// any positional slot may be missing. Absent and empty values both render
/// as `n.d.` in the textual and CSV views.
///
/// The complaint number is not stored: it is derived from the `nrg` query
/// parameter of the source URL each time it is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerdictRecord {
    /// European Case Law Identifier
    pub ecli: Option<String>,

    /// Decision title
    pub title: Option<String>,

    /// Decision type (e.g. "Sentenza")
    pub decision_type: Option<String>,

    /// Decision number
    pub decision_number: Option<String>,

    /// Tribunal code, also the prefix of the target filename
    pub tribunal_code: Option<String>,

    /// Tribunal city
    pub tribunal_city: Option<String>,

    /// Tribunal section
    pub tribunal_section: Option<String>,

    /// Recourse number as printed in the result body
    pub recourse_number: Option<String>,

    /// Full URL of the verdict document
    pub url: Option<String>,

    /// Filename the document is stored under
    pub filename: Option<String>,
}

impl VerdictRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Complaint number derived from the source URL
    ///
    /// Empty when the record has no URL or the URL has no `nrg` parameter.
    pub fn complaint_number(&self) -> String {
        self.url
            .as_deref()
            .map(complaint_number_from_url)
            .unwrap_or_default()
    }

    /// The ten rendered field values in listing column order
    pub fn csv_fields(&self) -> [String; 10] {
        let complaint = self.complaint_number();
        [
            render(&self.ecli),
            render(&self.title),
            render(&self.decision_type),
            render(&self.decision_number),
            render(&self.tribunal_code),
            render(&self.tribunal_city),
            render(&self.tribunal_section),
            or_not_available(Some(complaint.as_str())).to_string(),
            render(&self.url),
            render(&self.filename),
        ]
    }

    /// `;`-joined CSV view without the page column
    pub fn to_csv(&self) -> String {
        self.csv_fields().join(";")
    }
}

fn render(value: &Option<String>) -> String {
    or_not_available(value.as_deref()).to_string()
}

impl fmt::Display for VerdictRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let complaint = self.complaint_number();
        let lines = [
            ("Decision - ECLI:", self.ecli.as_deref()),
            ("Decision - title:", self.title.as_deref()),
            ("Decision - type:", self.decision_type.as_deref()),
            ("Decision - number:", self.decision_number.as_deref()),
            ("Tribunal - code:", self.tribunal_code.as_deref()),
            ("Tribunal - city:", self.tribunal_city.as_deref()),
            ("Tribunal - section:", self.tribunal_section.as_deref()),
            ("Complaint - number:", Some(complaint.as_str())),
            ("Recourse - number:", self.recourse_number.as_deref()),
            ("Verdict - URL:", self.url.as_deref()),
            ("Verdict - file:", self.filename.as_deref()),
        ];

        for (i, (label, value)) in lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {}", label, or_not_available(*value))?;
        }
        Ok(())
    }
}

/// Fields of a [`VerdictRecord`] filled in from the result markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictField {
    Ecli,
    Title,
    DecisionType,
    DecisionNumber,
    TribunalCode,
    TribunalCity,
    TribunalSection,
    RecourseNumber,
    Url,
    Filename,
}

impl VerdictField {
    /// Every extracted field
    pub const ALL: [VerdictField; 10] = [
        VerdictField::Ecli,
        VerdictField::Title,
        VerdictField::DecisionType,
        VerdictField::DecisionNumber,
        VerdictField::TribunalCode,
        VerdictField::TribunalCity,
        VerdictField::TribunalSection,
        VerdictField::RecourseNumber,
        VerdictField::Url,
        VerdictField::Filename,
    ];

    /// Short field name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictField::Ecli => "ecli",
            VerdictField::Title => "title",
            VerdictField::DecisionType => "decision_type",
            VerdictField::DecisionNumber => "decision_number",
            VerdictField::TribunalCode => "tribunal_code",
            VerdictField::TribunalCity => "tribunal_city",
            VerdictField::TribunalSection => "tribunal_section",
            VerdictField::RecourseNumber => "recourse_number",
            VerdictField::Url => "url",
            VerdictField::Filename => "filename",
        }
    }

    /// Current value of this field in a record
    pub fn value<'a>(&self, record: &'a VerdictRecord) -> Option<&'a str> {
        match self {
            VerdictField::Ecli => record.ecli.as_deref(),
            VerdictField::Title => record.title.as_deref(),
            VerdictField::DecisionType => record.decision_type.as_deref(),
            VerdictField::DecisionNumber => record.decision_number.as_deref(),
            VerdictField::TribunalCode => record.tribunal_code.as_deref(),
            VerdictField::TribunalCity => record.tribunal_city.as_deref(),
            VerdictField::TribunalSection => record.tribunal_section.as_deref(),
            VerdictField::RecourseNumber => record.recourse_number.as_deref(),
            VerdictField::Url => record.url.as_deref(),
            VerdictField::Filename => record.filename.as_deref(),
        }
    }
}

impl fmt::Display for VerdictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of the `nrg` query parameter of a URL, or an empty string
///
/// Works on absolute and relative URLs alike; only the query part is read.
pub fn complaint_number_from_url(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let Some((_, query)) = without_fragment.split_once('?') else {
        return String::new();
    };

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == COMPLAINT_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Target filename for a verdict document
///
/// Composed as `{tribunal_code}_{value}` where `value` is the value of the
/// fourth `&`-delimited segment of the document URL. `None` when the URL has
/// fewer segments or the segment carries no `=`.
pub fn document_filename(tribunal_code: &str, href: &str) -> Option<String> {
    let segment = href.split('&').nth(3)?;
    let value = segment.split('=').nth(1)?;
    Some(format!("{}_{}", tribunal_code, value))
}

// =============================================================================
// Corpus Statistics
// =============================================================================

/// Statistics for one directory of downloaded documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Directory the statistics were computed for
    pub directory_path: String,

    /// Lowercased file extension to file count
    pub extensions: BTreeMap<String, usize>,

    /// Court prefix to number of filenames starting with it
    pub court_counts: BTreeMap<String, usize>,

    /// Files counted, hidden/temp artifacts excluded
    pub total_files: usize,
}

impl StatsRecord {
    /// Create an empty record for a directory
    pub fn new(directory_path: impl Into<String>) -> Self {
        Self {
            directory_path: directory_path.into(),
            ..Default::default()
        }
    }

    /// Count one file with its extension and matched court prefixes
    pub fn add_file<'a>(&mut self, extension: &str, prefixes: impl IntoIterator<Item = &'a str>) {
        self.total_files += 1;
        *self.extensions.entry(extension.to_lowercase()).or_insert(0) += 1;
        for prefix in prefixes {
            *self.court_counts.entry(prefix.to_string()).or_insert(0) += 1;
        }
    }
}
