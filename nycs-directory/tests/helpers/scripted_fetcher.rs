//! In-process JsonFetcher with canned responses

use async_trait::async_trait;
use nycs_directory::{FetchError, JsonFetcher, RawRecord};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Canned response for one URL
#[derive(Debug, Clone)]
pub enum Scripted {
    Records(Vec<RawRecord>),
    NetworkFailure(String),
    ParseFailure(String),
}

/// Fetcher that records every URL it is asked for
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: HashMap<String, Scripted>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, response: Scripted) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Sleep before answering, to keep the first fetch in flight
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<RawRecord>, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.responses.get(url) {
            Some(Scripted::Records(records)) => Ok(records.clone()),
            Some(Scripted::NetworkFailure(msg)) => Err(FetchError::NetworkError(msg.clone())),
            Some(Scripted::ParseFailure(msg)) => Err(FetchError::ParseError(msg.clone())),
            None => Err(FetchError::HttpStatus(404, format!("no script for {}", url))),
        }
    }
}
