//! Search portal access
//!
//! This module drives the judgment search form of the administrative justice
//! portal. The harvester only sees the [`SearchPortal`] trait: one call per
//! result page, returning the page HTML.
//!
//! # Session protocol
//!
//! 1. Open the landing page and follow the navigation link to the judgment
//!    search page
//! 2. For every page: select the search form by id, set query, page size,
//!    decision type and year
//! 3. Page 0 submits the form as is; any other page also sets the hidden
//!    `step` field to the page index, relying on the session to keep the
//!    original query
//!
//! A form or field that cannot be found aborts the run: it means the portal
//! markup changed.

pub mod browser;
pub mod form;

pub use browser::{Browser, Page};
pub use form::{FormField, FormMethod, HtmlForm};

use crate::Result;
use crate::config::Config;
use crate::constants::search_form;
use tracing::info;

/// Parameters of one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,
    /// Decision year
    pub year: i32,
    /// Results requested per page
    pub page_size: u32,
    /// Decision type filter
    pub decision_type: String,
}

impl SearchRequest {
    /// Build a request using the configured page size and decision type
    pub fn new(query: impl Into<String>, year: i32, config: &Config) -> Self {
        Self {
            query: query.into(),
            year,
            page_size: config.paging,
            decision_type: config.decision_type.clone(),
        }
    }

    /// Write the search parameters into the search form
    pub fn apply(&self, form: &mut HtmlForm, page: u32) -> Result<()> {
        form.set(search_form::QUERY_FIELD, self.query.as_str())?;
        form.set(search_form::PAGE_SIZE_FIELD, self.page_size.to_string())?;
        form.set(search_form::DECISION_TYPE_FIELD, self.decision_type.as_str())?;
        form.set(search_form::YEAR_FIELD, self.year.to_string())?;

        if page != 0 {
            form.set(search_form::STEP_FIELD, page.to_string())?;
        }
        Ok(())
    }
}

/// Source of search result pages
pub trait SearchPortal {
    /// Submit the search for `page` and return the response HTML
    fn fetch_page(&mut self, request: &SearchRequest, page: u32) -> Result<String>;
}

/// Search portal reached over HTTP
pub struct LivePortal {
    browser: Browser,
}

impl LivePortal {
    /// Open the portal and navigate to the judgment search page
    pub fn connect(config: &Config) -> Result<Self> {
        let mut browser = Browser::new()?;
        browser.open(&config.search_url)?;
        let page = browser.follow_link(&config.search_link)?;
        info!("Search page: {}", page.url);

        Ok(Self { browser })
    }
}

impl SearchPortal for LivePortal {
    fn fetch_page(&mut self, request: &SearchRequest, page: u32) -> Result<String> {
        let mut form = self.browser.select_form(search_form::FORM_ID)?;
        request.apply(&mut form, page)?;
        let response = self.browser.submit(&form)?;
        Ok(response.body.clone())
    }
}
