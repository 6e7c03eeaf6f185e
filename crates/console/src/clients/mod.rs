//! HTTP clients for the Chess Out API.

pub mod analysis;
pub mod best_move;
pub mod notation;

use reqwest::Response;

const USER_AGENT: &str = "Chessout/1.0";
const REQUEST_TIMEOUT_SECS: u64 = 30;

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap()
}

/// Pull the human-readable `detail` field out of an error response, falling
/// back to the bare HTTP status.
async fn error_detail(resp: Response) -> String {
    let status = resp.status();
    match resp.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("detail")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("HTTP {status}")),
        Err(_) => format!("HTTP {status}"),
    }
}
