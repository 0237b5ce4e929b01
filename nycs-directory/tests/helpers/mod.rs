//! Test Helper Utilities
//!
//! Shared utilities for testing nycs-directory

#![allow(dead_code, unused_imports)]

pub mod log_capture;
pub mod mock_server;
pub mod scripted_fetcher;

pub use log_capture::{capture_logs, LogCapture};
pub use mock_server::{json_route, spawn_server, HitCounter};
pub use scripted_fetcher::{Scripted, ScriptedFetcher};

use nycs_common::config::SourceUrls;

pub const DIRECTORY_URL: &str = "mock://directory";
pub const SAT_URL: &str = "mock://sat";

pub fn mock_urls() -> SourceUrls {
    SourceUrls {
        directory_url: DIRECTORY_URL.to_string(),
        sat_url: SAT_URL.to_string(),
    }
}

/// Directory payload from the documented merge scenario
pub const SCENARIO_DIRECTORY: &str = r#"[
    {"school_name":"A","overview_paragraph":"desc"},
    {"school_name":"B","overview_paragraph":""}
]"#;

/// SAT payload from the documented merge scenario
pub const SCENARIO_SAT: &str = r#"[
    {"school_name":"A","num_of_sat_test_takers":"100","sat_math_avg_score":"550"},
    {"school_name":"C","sat_math_avg_score":"600"}
]"#;

pub fn json_records(body: &str) -> Vec<serde_json::Value> {
    nycs_directory::fetcher::parse_json_array(body).unwrap()
}
