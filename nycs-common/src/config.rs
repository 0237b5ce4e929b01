//! Configuration loading and source URL resolution
//!
//! Source URLs are resolved with the priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// NYC Open Data 2017 DOE High School Directory
pub const DEFAULT_DIRECTORY_URL: &str = "https://data.cityofnewyork.us/resource/s3k6-pzi2.json";
/// NYC Open Data 2012 SAT Results
pub const DEFAULT_SAT_URL: &str = "https://data.cityofnewyork.us/resource/f9bf-2cp4.json";

pub const DIRECTORY_URL_ENV: &str = "NYCS_DIRECTORY_URL";
pub const SAT_URL_ENV: &str = "NYCS_SAT_URL";

/// Top-level TOML configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Dataset endpoints
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// Dataset endpoints from the `[sources]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub directory_url: Option<String>,
    pub sat_url: Option<String>,
}

/// Logging configuration from the `[logging]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info", "nycs_directory=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP client settings from the `[http]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Overrides the client's User-Agent header
    pub user_agent: Option<String>,
}

/// Fully resolved dataset endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    pub directory_url: String,
    pub sat_url: String,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            sat_url: DEFAULT_SAT_URL.to_string(),
        }
    }
}

/// Default configuration file path: `<config_dir>/nycs/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("nycs").join("config.toml"))
}

/// Load a TOML configuration file
///
/// A missing file is not an error: a warning is logged and defaults are
/// returned. A file that exists but does not parse is `Error::Config`.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    match read_toml_config(path)? {
        Some(config) => {
            info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => {
            warn!("Config file not found at {}, using defaults", path.display());
            Ok(TomlConfig::default())
        }
    }
}

/// Read and parse a TOML config file without logging
///
/// Returns `Ok(None)` when the file does not exist. Used before the tracing
/// subscriber is installed.
pub fn read_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))?;

    Ok(Some(config))
}

/// Resolves the two dataset URLs across all configuration tiers
pub struct SourceUrlResolver<'a> {
    toml: &'a TomlConfig,
    cli_directory_url: Option<String>,
    cli_sat_url: Option<String>,
}

impl<'a> SourceUrlResolver<'a> {
    pub fn new(toml: &'a TomlConfig) -> Self {
        Self {
            toml,
            cli_directory_url: None,
            cli_sat_url: None,
        }
    }

    pub fn with_cli(mut self, directory_url: Option<String>, sat_url: Option<String>) -> Self {
        self.cli_directory_url = directory_url;
        self.cli_sat_url = sat_url;
        self
    }

    pub fn resolve(&self) -> SourceUrls {
        SourceUrls {
            directory_url: resolve_one(
                "directory",
                self.cli_directory_url.as_deref(),
                DIRECTORY_URL_ENV,
                self.toml.sources.directory_url.as_deref(),
                DEFAULT_DIRECTORY_URL,
            ),
            sat_url: resolve_one(
                "sat",
                self.cli_sat_url.as_deref(),
                SAT_URL_ENV,
                self.toml.sources.sat_url.as_deref(),
                DEFAULT_SAT_URL,
            ),
        }
    }
}

fn resolve_one(
    label: &str,
    cli: Option<&str>,
    env_var: &str,
    toml: Option<&str>,
    default: &str,
) -> String {
    if let Some(url) = cli.filter(|u| is_valid_url(u)) {
        debug!(source = label, "URL from command line");
        return url.to_string();
    }

    if let Ok(url) = std::env::var(env_var) {
        if is_valid_url(&url) {
            debug!(source = label, "URL from environment ({})", env_var);
            return url;
        }
    }

    if let Some(url) = toml.filter(|u| is_valid_url(u)) {
        debug!(source = label, "URL from TOML config");
        return url.to_string();
    }

    default.to_string()
}

/// Non-empty, non-whitespace
pub fn is_valid_url(url: &str) -> bool {
    !url.trim().is_empty()
}
