//! Application constants for the verdict scraper
//!
//! This module contains the portal form identifiers, listing file layout,
//! and default configuration values used throughout the pipeline.

// =============================================================================
// Search Portal
// =============================================================================

/// Landing page of the administrative justice portal
pub const DEFAULT_SEARCH_URL: &str = "https://www.giustizia-amministrativa.it";

/// Navigation link (href fragment) leading from the landing page to the
/// judgment search page
pub const DEFAULT_SEARCH_LINK: &str = "dcsnprr";

/// Decision type filter applied to every search
pub const DEFAULT_DECISION_TYPE: &str = "Sentenza";

/// User agent sent with every portal and document request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Identifiers of the judgment search form and its fields
///
/// The portal is a Liferay instance; every name carries the portlet
/// instance prefix.
pub mod search_form {
    /// `id` attribute of the search form
    pub const FORM_ID: &str = "_GaSearch_INSTANCE_2NDgCF3zWBwk_provvedimentiForm";

    /// Free-text query textbox
    pub const QUERY_FIELD: &str = "_GaSearch_INSTANCE_2NDgCF3zWBwk_searchtextProvvedimenti";

    /// Results-per-page selectbox
    pub const PAGE_SIZE_FIELD: &str = "_GaSearch_INSTANCE_2NDgCF3zWBwk_pageResultsProvvedimenti";

    /// Decision type selectbox
    pub const DECISION_TYPE_FIELD: &str = "_GaSearch_INSTANCE_2NDgCF3zWBwk_TipoProvvedimentoItem";

    /// Decision year selectbox
    pub const YEAR_FIELD: &str = "_GaSearch_INSTANCE_2NDgCF3zWBwk_DataYearItem";

    /// Hidden field holding the requested result page
    pub const STEP_FIELD: &str = "_GaSearch_INSTANCE_2NDgCF3zWBwk_step";
}

/// CSS selectors used to take a result page apart
pub mod selectors {
    /// One result container per verdict, plus a trailing non-result footer
    pub const RESULT_CONTAINER: &str = "article";

    /// First class of a genuine result container
    pub const RESULT_ITEM_CLASS: &str = "ricerca--item";

    /// Anchors pointing at the verdict document, carrying the tribunal code
    pub const TRIBUNAL_ANCHOR: &str = "a[data-sede]";

    /// Attribute holding the tribunal code
    pub const TRIBUNAL_ATTRIBUTE: &str = "data-sede";

    /// Positional sub-sections of a result container
    pub const RESULT_SECTION: &str = "div.col-sm-12";

    /// Pagination list items; the last one links to the last page
    pub const PAGINATION_ITEM: &str = "li.pagination-li";

    /// Inline page-jump handler name
    pub const PAGE_JUMP_HANDLER: &str = "changePage";
}

// =============================================================================
// Listing File
// =============================================================================

/// Field delimiter of listing files
pub const LISTING_DELIMITER: u8 = b';';

/// Header row injected once a harvest run completes
pub const LISTING_HEADER: &str = "pagina;codice_ecli;provvedimento_titolo;provvedimento_tipo;sentenza_numero;tribunale_codice;tribunale_citta;tribunale_sezione;ricorso_numero;sentenza_url;sentenza_file";

/// Number of fields per listing row (page + ten record fields)
pub const LISTING_FIELD_COUNT: usize = 11;

/// Listing column names used by the document fetcher
pub mod columns {
    pub const URL: &str = "sentenza_url";
    pub const FILE: &str = "sentenza_file";
}

/// Rendering of an absent or empty field
pub const NOT_AVAILABLE: &str = "n.d.";

/// Query parameter carrying the complaint registration number
pub const COMPLAINT_QUERY_PARAM: &str = "nrg";

/// Token in the listing filename template replaced by the year
pub const YEAR_TOKEN: &str = "Y";

// =============================================================================
// Corpus Analysis
// =============================================================================

/// Name prefix of OS hidden/temp artifacts excluded from statistics
pub const HIDDEN_FILE_PREFIX: &str = "._";

/// Indentation of the pretty-printed stats file
pub const STATS_JSON_INDENT: &[u8] = b"    ";

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Default directory holding listings and downloaded verdicts
pub const DEFAULT_VERDICTS_DIR: &str = "verdicts";

/// Default listing filename template
pub const DEFAULT_VERDICTS_FILE: &str = "verdicts_Y.csv";

/// Default number of results requested per page
pub const DEFAULT_PAGING: u32 = 20;

/// Default maximum number of pages requested in one harvest run
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// Default directory and file for corpus statistics
pub const DEFAULT_STATS_DIR: &str = "stats";
pub const DEFAULT_STATS_FILE: &str = "verdicts_stats.json";

/// Default directory and file of the court reference list
pub const DEFAULT_COURTS_DIR: &str = "court";
pub const DEFAULT_COURTS_FILE: &str = "court.csv";

/// Configuration filename looked up in the working and user config dirs
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Application directory name under the user config dir
pub const APP_DIR_NAME: &str = "verdict-scraper";

/// Default page increment (1 = plain sequential walk)
pub const DEFAULT_PAGE_INCREMENT: u32 = 1;

// =============================================================================
// Helper Functions
// =============================================================================

/// Render an optional field value, substituting the sentinel when absent or empty
pub fn or_not_available(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}
