use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;

use crate::models::{Country, CountryDto};

/// Fetch failures, one variant per stage of the cycle
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not initialize HTTP client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(StatusCode),

    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Blocking HTTP client for the country-data endpoint
///
/// Lives on the fetch worker thread; one GET per request, no retries and no
/// caching.
pub struct CountryClient {
    client: Client,
    endpoint: String,
}

impl CountryClient {
    pub fn new(endpoint: String) -> Result<Self, FetchError> {
        let client = Client::builder()
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(CountryClient { client, endpoint })
    }

    /// Fetch the full country collection from the configured endpoint
    ///
    /// The body is read as text first so status, transport, and parse
    /// failures stay distinguishable.
    pub fn fetch_all(&self) -> Result<Vec<Country>, FetchError> {
        log::debug!("GET {}", self.endpoint);
        let resp = self.client.get(&self.endpoint).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = resp.text()?;
        let records: Vec<CountryDto> = serde_json::from_str(&body)?;

        log::debug!("Fetched {} country records", records.len());
        Ok(records.into_iter().map(Country::from).collect())
    }
}
