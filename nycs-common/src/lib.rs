//! # NYC Schools Common Library
//!
//! Shared code for the school directory crates:
//! - Error type and result alias
//! - Configuration loading (TOML + environment overrides)
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
