//! nycs-directory - NYC high school directory loader
//!
//! Fetches the school directory and SAT results, merges them by school name
//! and prints the result (text summary, JSON, or a single school).

use anyhow::{anyhow, Result};
use clap::Parser;
use nycs_common::config::{default_config_path, read_toml_config, SourceUrlResolver};
use nycs_directory::{DirectoryController, School};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "nycs-directory", version, about = "Merged NYC school directory with SAT results")]
struct Cli {
    /// TOML config file (defaults to <config_dir>/nycs/config.toml)
    #[arg(long, env = "NYCS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the directory dataset URL
    #[arg(long)]
    directory_url: Option<String>,

    /// Override the SAT dataset URL
    #[arg(long)]
    sat_url: Option<String>,

    /// Print a single school by exact name
    #[arg(long)]
    lookup: Option<String>,

    /// Print JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Read config before tracing exists; report how it went afterwards
    let config_path = cli.config.clone().or_else(default_config_path);
    let loaded = match &config_path {
        Some(path) => read_toml_config(path)?,
        None => None,
    };
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();

    nycs_common::logging::init_tracing(&config.logging)?;

    info!("Starting nycs-directory v{}", env!("CARGO_PKG_VERSION"));
    match (&config_path, from_file) {
        (Some(path), true) => info!("Loaded config from {}", path.display()),
        (Some(path), false) => warn!("Config file not found at {}, using defaults", path.display()),
        (None, _) => warn!("No config directory available, using defaults"),
    }

    let urls = SourceUrlResolver::new(&config)
        .with_cli(cli.directory_url.clone(), cli.sat_url.clone())
        .resolve();

    let controller = DirectoryController::from_http_config(urls, &config.http)?;
    let directory = controller.initialize().await?;

    if let Some(name) = cli.lookup.as_deref() {
        let school = directory
            .lookup(name)
            .ok_or_else(|| anyhow!("School not found: {}", name))?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(school)?);
        } else {
            println!("{}", describe(school));
        }
        return Ok(());
    }

    let schools = directory.schools_sorted();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&schools)?);
    } else {
        for school in &schools {
            println!("{}", describe(school));
        }
        info!("{} schools", schools.len());
    }

    Ok(())
}

fn describe(school: &School) -> String {
    let mut line = school.name.clone();

    if let Some(sat) = &school.sat_data {
        let score = |s: Option<i32>| s.map_or_else(|| "-".to_string(), |v| v.to_string());
        line.push_str(&format!(
            " | takers {} | reading {} | math {} | writing {}",
            score(sat.num_test_takers),
            score(sat.avg_reading_score),
            score(sat.avg_math_score),
            score(sat.avg_writing_score),
        ));
    }

    if let Some(overview) = &school.overview {
        line.push_str("\n    ");
        line.push_str(overview);
    }

    line
}
