//! nycs-directory library interface
//!
//! Fetches the NYC high school directory and the SAT results datasets,
//! merges them by school name and memoizes the merged [`Directory`].

pub mod builder;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod parser;

pub use crate::builder::{BuildStats, DirectoryBuilder};
pub use crate::controller::{ControllerState, DirectoryController, InitOutcome};
pub use crate::error::{FetchError, InitError, MissingScore, SkipRecord, SourceKind};
pub use crate::fetcher::{HttpJsonFetcher, JsonFetcher, RawRecord};
pub use crate::models::{Directory, SatData, School};
