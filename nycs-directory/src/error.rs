//! Error types for nycs-directory
//!
//! Failures are layered by how far they may travel:
//! - [`FetchError`]: batch-level, aborts initialization
//! - [`SkipRecord`]: record-level, the record is dropped
//! - [`MissingScore`]: field-level, the score is left absent
//! - [`InitError`]: the single failure outcome seen by controller callers

use std::fmt;
use thiserror::Error;

/// Fetcher errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failed, timed out or the body could not be read
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server answered with a non-success status
    #[error("HTTP error {0}: {1}")]
    HttpStatus(u16, String),

    /// Body is not valid JSON or not a JSON array
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl FetchError {
    /// Transport-level failure (as opposed to a bad body)
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::NetworkError(_) | FetchError::HttpStatus(..))
    }
}

/// One array element could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipRecord {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("missing or non-string field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' is empty")]
    EmptyField(&'static str),
}

/// One score field could not be parsed as an integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("score '{field}' unavailable: {reason}")]
pub struct MissingScore {
    pub field: &'static str,
    pub reason: String,
}

/// Which step of initialization a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Directory,
    Sat,
    /// Neither fetch: the sequence could not start or was torn down
    Controller,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Directory => write!(f, "directory"),
            SourceKind::Sat => write!(f, "SAT"),
            SourceKind::Controller => write!(f, "controller"),
        }
    }
}

/// Initialization failure recorded by the controller
///
/// Cloneable so the memoized outcome can be handed to every caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitError {
    pub source_kind: SourceKind,
    /// True when the underlying failure was transport-level
    pub network: bool,
    pub message: String,
}

impl InitError {
    pub fn from_fetch(source_kind: SourceKind, err: &FetchError) -> Self {
        Self {
            source_kind,
            network: err.is_network(),
            message: err.to_string(),
        }
    }

    /// The sequence stopped during `source_kind` without an outcome
    pub(crate) fn aborted(source_kind: SourceKind, message: impl Into<String>) -> Self {
        Self {
            source_kind,
            network: false,
            message: message.into(),
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source_kind {
            SourceKind::Controller => write!(f, "initialization aborted: {}", self.message),
            kind => write!(f, "failed to load {} data: {}", kind, self.message),
        }
    }
}

impl std::error::Error for InitError {}
