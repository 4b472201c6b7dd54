//! HTTP implementation of the catalog client.
//!
//! One GET per search: `<endpoint>?search=<text>&page=<n>`, decoded from
//! the endpoint's JSON envelope. Timeouts are the only policy layered in
//! here; everything else (retries, staleness, caching) is the caller's.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::CatalogClient;
use crate::model::{Character, CharacterPage, ClientError};

/// Wire envelope of the search endpoint.
///
/// `next`/`previous` are pagination cursors the store never follows (it
/// addresses pages by number), but they are part of the payload shape and
/// decoding them keeps malformed-payload detection honest.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    count: u64,
    #[allow(dead_code)]
    next: Option<String>,
    #[allow(dead_code)]
    previous: Option<String>,
    results: Vec<Character>,
}

/// Catalog client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpCatalogClient {
    /// Build a client for `endpoint` with a per-request timeout.
    ///
    /// Fails when the endpoint is not a valid URL or the underlying HTTP
    /// client cannot be constructed.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| ClientError::Request(format!("bad endpoint: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::from)?;
        Ok(Self { http, endpoint })
    }

    /// The request URL for one (query, page) pair.
    fn search_url(&self, query: &str, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("search", query)
            .append_pair("page", &page.to_string());
        url
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn search(&self, query: &str, page: u32) -> Result<CharacterPage, ClientError> {
        let url = self.search_url(query, page);
        let response = self.http.get(url).send().await?;
        let response = response.error_for_status()?;
        let envelope: SearchEnvelope = response.json().await?;
        Ok(CharacterPage {
            total: envelope.count,
            characters: envelope.results,
        })
    }
}
