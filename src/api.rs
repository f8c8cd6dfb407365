// API client module: a small blocking HTTP client that pages through the
// PokeAPI location-area listing. Synchronous on purpose; the REPL waits
// for every fetch anyway.

use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// One entry of the listing. The API also sends a `url` per area, which
/// we do not need.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LocationArea {
    pub name: String,
}

/// A single page of the listing together with its pagination links.
/// `next` is absent on the last page, `previous` on the first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LocationPage {
    pub results: Vec<LocationArea>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, refused, timeout...).
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not JSON shaped like a `LocationPage`.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can turn a page URL into a `LocationPage`. The REPL only
/// talks to this trait so commands can run against an in-memory listing.
pub trait PageSource {
    fn fetch_page(&self, url: &str) -> Result<LocationPage, FetchError>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn fetch_page(&self, url: &str) -> Result<LocationPage, FetchError> {
        (**self).fetch_page(url)
    }
}

/// Blocking client for the public listing. Holds a single reqwest client
/// so connections are reused between pages.
#[derive(Clone)]
pub struct PokeApiClient {
    client: Client,
}

impl PokeApiClient {
    /// Build a client honouring the configured request timeout (none by
    /// default).
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(PokeApiClient { client })
    }
}

impl PageSource for PokeApiClient {
    fn fetch_page(&self, url: &str) -> Result<LocationPage, FetchError> {
        debug!(url, "fetching location areas");

        let res = self.client.get(url).send().map_err(|source| {
            warn!(url, error = %source, "request failed");
            FetchError::Network {
                url: url.to_string(),
                source,
            }
        })?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            warn!(url, status, "unexpected status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        // Read the body first so a broken connection is reported as a
        // network failure and not as bad JSON.
        let body = res.text().map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

        let page: LocationPage = serde_json::from_str(&body).map_err(|source| {
            warn!(url, error = %source, "response did not decode");
            FetchError::Decode {
                url: url.to_string(),
                source,
            }
        })?;

        debug!(
            url,
            results = page.results.len(),
            has_next = page.next.is_some(),
            has_previous = page.previous.is_some(),
            "page decoded"
        );
        Ok(page)
    }
}
