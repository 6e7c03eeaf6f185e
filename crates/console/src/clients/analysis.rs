use reqwest::Client;
use serde_json::json;

use replay_core::analysis::AnalysisEntry;

use super::error_detail;

#[derive(Clone)]
pub struct AnalysisEngineClient {
    client: Client,
    base_url: String,
}

impl AnalysisEngineClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: super::build_client(),
            base_url: base_url.to_string(),
        }
    }

    /// Evaluate a position: overall score plus up to `multipv` ranked lines.
    pub async fn analyze(
        &self,
        fen: &str,
        depth: u32,
        multipv: u32,
    ) -> Result<AnalysisEntry, String> {
        let url = format!("{}/api/analyze_fen", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&json!({ "fen": fen, "depth": depth, "multipv": multipv }))
            .send()
            .await
            .map_err(|e| format!("Request error: {e}"))?;

        if !resp.status().is_success() {
            return Err(error_detail(resp).await);
        }

        resp.json()
            .await
            .map_err(|e| format!("JSON parse error: {e}"))
    }

    /// Probe the API health endpoint.
    pub async fn health(&self) -> Result<(), String> {
        let url = format!("{}/api/health", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Request error: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }
        Ok(())
    }
}
