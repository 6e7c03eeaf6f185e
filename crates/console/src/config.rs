//! Console configuration from environment variables.

use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the Chess Out API
    pub api_base_url: String,

    /// Search depth for analysis and best-move requests (API accepts 1-30)
    pub analysis_depth: u32,

    /// Recommendation lines per analysis (API accepts 1-10)
    pub analysis_multipv: u32,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults. Out-of-range values are clamped to what the API accepts.
    pub fn from_env() -> Self {
        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        let analysis_depth = env::var("ANALYSIS_DEPTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(12)
            .clamp(1, 30);

        let analysis_multipv = env::var("ANALYSIS_MULTIPV")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5)
            .clamp(1, 10);

        Self {
            api_base_url,
            analysis_depth,
            analysis_multipv,
        }
    }
}
