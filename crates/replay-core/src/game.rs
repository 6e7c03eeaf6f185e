use serde::{Deserialize, Serialize};

/// Recorded result of a finished game, as reported by the notation parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOutcome {
    pub result: String, // "1-0", "0-1", "1/2-1/2"
    pub verdict: Option<String>,
    pub reason: Option<String>,
    pub details: Option<String>,
}

impl GameOutcome {
    /// One-line rendering: `White wins (1-0): Checkmate`.
    pub fn describe(&self) -> String {
        let headline = match &self.verdict {
            Some(verdict) => format!("{} ({})", verdict, self.result),
            None => self.result.clone(),
        };
        match &self.reason {
            Some(reason) => format!("{}: {}", headline, reason),
            None => headline,
        }
    }
}

/// A game as returned by the notation parser: the complete position sequence
/// (starting position included) and the moves between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedGame {
    pub start_fen: String,
    pub fens: Vec<String>,
    pub moves: Vec<String>,
    pub outcome: Option<GameOutcome>,
}
