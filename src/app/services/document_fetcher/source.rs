//! Document download sources

use crate::constants::USER_AGENT;
use crate::{Error, Result};
use reqwest::blocking::Client;
use tracing::debug;

/// Source of document bodies by URL
pub trait DocumentSource {
    /// Download a document, failing on transport errors and non-2xx status
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>>;
}

/// Documents downloaded over HTTP
///
/// Certificate verification is disabled: the document host has served
/// incomplete certificate chains.
pub struct HttpDocumentSource {
    client: Client,
}

impl HttpDocumentSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| Error::http("Failed to build HTTP client", e))?;

        Ok(Self { client })
    }
}

impl DocumentSource for HttpDocumentSource {
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::http(format!("Failed to download {}", url), e))?;

        let body = response
            .bytes()
            .map_err(|e| Error::http(format!("Failed to read body of {}", url), e))?;
        Ok(body.to_vec())
    }
}
