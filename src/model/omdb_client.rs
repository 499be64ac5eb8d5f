//! OMDb API client
//!
//! Every call is a single GET with no retry. OMDb wraps both response shapes in
//! the same envelope: `Response` is `"True"` or `"False"`, and a false answer
//! carries a human-readable `Error`. Decoding is kept separate from transport so
//! it can be exercised on fixture JSON.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::{log_api_request, log_api_result};
use super::content::{DetailRecord, SearchPage, SearchResultItem};
use super::error::ApiError;

const UNKNOWN_UPSTREAM_ERROR: &str = "Unknown error.";
const NO_MATCH_MESSAGE: &str = "Movie not found!";

/// Lookup interface the application model depends on
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// `query` must be non-empty
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ApiError>;

    async fn fetch_details(&self, imdb_id: &str) -> Result<DetailRecord, ApiError>;
}

#[derive(Clone)]
pub struct OmdbClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        // No status check: OMDb reports bad keys as 401 with a regular envelope
        let response = self
            .http
            .get(&self.api_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::NetworkFailure(e.to_string()))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::NetworkFailure(e.to_string()))
    }
}

#[async_trait]
impl MovieApi for OmdbClient {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ApiError> {
        log_api_request!("search", query, page);
        let page_param = page.to_string();
        let result = match self.get_json(&[("s", query), ("page", &page_param)]).await {
            Ok(body) => decode_search(body),
            Err(e) => Err(e),
        };
        log_api_result!("search", result);
        result
    }

    async fn fetch_details(&self, imdb_id: &str) -> Result<DetailRecord, ApiError> {
        log_api_request!("fetch_details", imdb_id);
        let result = match self.get_json(&[("i", imdb_id), ("plot", "full")]).await {
            Ok(body) => decode_details(body),
            Err(e) => Err(e),
        };
        log_api_result!("fetch_details", result);
        result
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "Search", default)]
    search: Vec<SearchResultItem>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
}

/// Returns the body if upstream reported success, otherwise its error text
fn accept_envelope(body: Value) -> Result<Value, ApiError> {
    if body.get("Response").and_then(Value::as_str) == Some("True") {
        return Ok(body);
    }

    let message = body
        .get("Error")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_UPSTREAM_ERROR);
    Err(ApiError::Upstream(message.to_string()))
}

pub fn decode_search(body: Value) -> Result<SearchPage, ApiError> {
    let body = accept_envelope(body)?;
    let decoded: SearchBody = serde_json::from_value(body)
        .map_err(|e| ApiError::NetworkFailure(format!("malformed search response: {}", e)))?;

    let total_results = match decoded.total_results.as_deref() {
        Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
            tracing::warn!(total_results = raw, "Unparsable totalResults, using 0");
            0
        }),
        None => 0,
    };

    // A successful page always has at least one item, so an empty one is a miss
    if decoded.search.is_empty() {
        tracing::warn!("Search succeeded with no items, treating as no match");
        return Err(ApiError::Upstream(NO_MATCH_MESSAGE.to_string()));
    }

    Ok(SearchPage {
        items: decoded.search,
        total_results,
    })
}

pub fn decode_details(body: Value) -> Result<DetailRecord, ApiError> {
    let body = accept_envelope(body)?;
    serde_json::from_value(body)
        .map_err(|e| ApiError::NetworkFailure(format!("malformed detail response: {}", e)))
}
