//! Stateful browsing session
//!
//! A blocking HTTP client with a cookie store that remembers the last page
//! it loaded, so forms can be selected from it and links followed relative
//! to it.

use super::form::{FormMethod, HtmlForm};
use crate::constants::USER_AGENT;
use crate::{Error, Result};
use reqwest::blocking::{Client, Response};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Last page loaded by the session
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub body: String,
}

/// Browser-like session against the search portal
pub struct Browser {
    client: Client,
    current: Option<Page>,
}

impl Browser {
    /// Create a session with an empty cookie jar
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(|e| Error::http("Failed to build HTTP client", e))?;

        Ok(Self {
            client,
            current: None,
        })
    }

    /// URL of the currently loaded page
    pub fn url(&self) -> Option<&Url> {
        self.current.as_ref().map(|p| &p.url)
    }

    /// Load a page by absolute URL
    pub fn open(&mut self, url: &str) -> Result<&Page> {
        let url = Url::parse(url)
            .map_err(|e| Error::configuration(format!("Invalid URL '{}': {}", url, e)))?;

        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| Error::http(format!("Failed to open {}", url), e))?;

        self.load(response)
    }

    /// Follow the first link whose `href` contains `fragment`
    pub fn follow_link(&mut self, fragment: &str) -> Result<&Page> {
        let page = self
            .current
            .as_ref()
            .ok_or_else(|| Error::link_not_found(fragment, "<no page loaded>"))?;

        let target = find_link(&page.body, fragment)
            .ok_or_else(|| Error::link_not_found(fragment, page.url.as_str()))?;
        let url = page.url.join(&target).map_err(|e| {
            Error::configuration(format!("Invalid link '{}': {}", target, e))
        })?;

        self.open(url.as_str())
    }

    /// Select a form by `id` from the current page
    pub fn select_form(&self, form_id: &str) -> Result<HtmlForm> {
        let page = self
            .current
            .as_ref()
            .ok_or_else(|| Error::form_not_found(form_id, "<no page loaded>"))?;

        HtmlForm::from_page(&page.body, form_id)?
            .ok_or_else(|| Error::form_not_found(form_id, page.url.as_str()))
    }

    /// Submit a form and load the response as the current page
    pub fn submit(&mut self, form: &HtmlForm) -> Result<&Page> {
        let base = self
            .url()
            .cloned()
            .ok_or_else(|| Error::form_not_found(form.id(), "<no page loaded>"))?;
        let action = form.action_url(&base)?;
        let pairs = form.pairs();

        debug!("{:?} {} ({} fields)", form.method(), action, pairs.len());
        let request = match form.method() {
            FormMethod::Post => self.client.post(action.clone()).form(&pairs),
            FormMethod::Get => self.client.get(action.clone()).query(&pairs),
        };
        let response = request
            .header(reqwest::header::REFERER, base.as_str())
            .send()
            .map_err(|e| Error::http(format!("Failed to submit form to {}", action), e))?;

        self.load(response)
    }

    fn load(&mut self, response: Response) -> Result<&Page> {
        let response = response
            .error_for_status()
            .map_err(|e| Error::http("Portal returned an error status", e))?;
        let url = response.url().clone();
        let body = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read body of {}", url), e))?;

        debug!("Loaded {} ({} bytes)", url, body.len());
        Ok(self.current.insert(Page { url, body }))
    }
}

/// `href` of the first anchor containing `fragment`
fn find_link(html: &str, fragment: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").unwrap();

    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| href.contains(fragment))
        .map(str::to_string)
}
