use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::error_detail;

/// A single engine recommendation in both notations.
#[derive(Debug, Clone, Deserialize)]
pub struct BestMove {
    pub uci: String,
    pub san: String,
}

#[derive(Clone)]
pub struct BestMoveClient {
    client: Client,
    base_url: String,
}

impl BestMoveClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: super::build_client(),
            base_url: base_url.to_string(),
        }
    }

    /// One-shot best-move request for a position. Stateless on both ends;
    /// nothing is cached.
    pub async fn best_move(&self, fen: &str, depth: u32) -> Result<BestMove, String> {
        let url = format!("{}/api/best_move", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&json!({ "fen": fen, "depth": depth }))
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
}
