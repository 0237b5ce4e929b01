//! JSON array fetcher
//!
//! One GET per call, full body read as text, parsed as a JSON array. No
//! retries and no caching at this layer; the caller decides what a failure
//! means.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

pub const USER_AGENT: &str = concat!("nycs-directory/", env!("CARGO_PKG_VERSION"));

/// One untyped element of a fetched array
pub type RawRecord = Value;

/// Source of raw JSON records
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Fetch `url` and return the elements of its top-level JSON array
    async fn fetch(&self, url: &str) -> Result<Vec<RawRecord>, FetchError>;
}

/// reqwest-backed fetcher
pub struct HttpJsonFetcher {
    http_client: reqwest::Client,
}

impl HttpJsonFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_user_agent(USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl JsonFetcher for HttpJsonFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<RawRecord>, FetchError> {
        tracing::debug!(url = %url, "Fetching JSON array");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus(status.as_u16(), error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        let records = parse_json_array(&body)?;

        tracing::info!(url = %url, records = records.len(), "Fetched JSON array");

        Ok(records)
    }
}

/// Parse a response body that must be a top-level JSON array
pub fn parse_json_array(body: &str) -> Result<Vec<RawRecord>, FetchError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(other) => Err(FetchError::ParseError(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(FetchError::ParseError(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
