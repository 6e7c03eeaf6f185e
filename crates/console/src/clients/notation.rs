use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use replay_core::game::{GameOutcome, ParsedGame};

use super::error_detail;

/// Wire shape of a successful parse.
#[derive(Deserialize)]
struct PgnResponse {
    start_fen: String,
    fens: Vec<String>,
    moves: Vec<String>,
    result: Option<String>,
    outcome: Option<String>,
    outcome_reason: Option<String>,
    outcome_details: Option<String>,
}

impl PgnResponse {
    fn into_game(self) -> ParsedGame {
        // "*" marks an unfinished game; it carries no outcome
        let outcome = match self.result {
            Some(result) if result != "*" => Some(GameOutcome {
                result,
                verdict: self.outcome,
                reason: self.outcome_reason,
                details: self.outcome_details,
            }),
            _ => None,
        };
        ParsedGame {
            start_fen: self.start_fen,
            fens: self.fens,
            moves: self.moves,
            outcome,
        }
    }
}

#[derive(Clone)]
pub struct NotationParserClient {
    client: Client,
    base_url: String,
}

impl NotationParserClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: super::build_client(),
            base_url: base_url.to_string(),
        }
    }

    /// Parse PGN text into the full position sequence.
    pub async fn parse_pgn(&self, pgn: &str) -> Result<ParsedGame, String> {
        let url = format!("{}/api/parse_pgn", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&json!({ "pgn": pgn }))
            .send()
            .await
            .map_err(|e| format!("Request error: {e}"))?;

        if !resp.status().is_success() {
            return Err(error_detail(resp).await);
        }

        let body: PgnResponse = resp
            .json()
            .await
            .map_err(|e| format!("JSON parse error: {e}"))?;

        Ok(body.into_game())
    }
}
