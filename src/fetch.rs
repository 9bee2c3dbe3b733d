//! Blocking page fetcher

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; CapitalsScraper/1.0)";
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a page could not be fetched. Always recoverable: the page is dropped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error fetching {url}: {status}")]
    Status { url: String, status: StatusCode },

    #[error("Error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Anything that can hand back the markup of a page
pub trait MarkupSource {
    fn fetch_markup(&self, url: &str) -> Result<String, FetchError>;
}

pub struct PageClient {
    client: Client,
}

impl PageClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl MarkupSource for PageClient {
    /// GET the page; anything but 200 is a failure
    fn fetch_markup(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(transport)?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        response.text().map_err(transport)
    }
}
