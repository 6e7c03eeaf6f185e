//! Rules engine backed by shakmaty: legality checking, SAN derivation, and
//! the resulting position for accepted move requests.

use replay_core::rules::{AcceptedMove, MoveRequest, RulesEngine};
use shakmaty::{fen::Fen, san::San, uci::UciMove, CastlingMode, Chess, EnPassantMode, Position};
use tracing::warn;

/// Standard-chess rules engine. Stateless; every request parses the
/// incoming FEN fresh.
#[derive(Debug, Clone, Default)]
pub struct BoardRules;

impl BoardRules {
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for BoardRules {
    fn try_move(&self, fen: &str, request: &MoveRequest) -> Option<AcceptedMove> {
        let parsed: Fen = match fen.parse() {
            Ok(f) => f,
            Err(err) => {
                warn!(fen = %fen, error = %err, "Rejecting move against unparseable FEN");
                return None;
            }
        };
        let pos: Chess = match parsed.into_position(CastlingMode::Standard) {
            Ok(p) => p,
            Err(err) => {
                warn!(fen = %fen, error = %err, "Rejecting move against unplayable position");
                return None;
            }
        };

        // Castling arrives as a king move (e1g1), promotions carry their
        // piece letter; UciMove resolves both against the legal move set.
        let uci: UciMove = request.uci().parse().ok()?;
        let mv = uci.to_move(&pos).ok()?;

        let san = San::from_move(&pos, mv).to_string();
        let next = pos.play(mv).ok()?;

        Some(AcceptedMove {
            san: decorate_san(san, &next),
            fen: Fen::from_position(&next, EnPassantMode::Legal).to_string(),
        })
    }
}

/// Append the check or mate suffix the bare SAN lacks.
fn decorate_san(mut san: String, after: &Chess) -> String {
    if after.is_checkmate() {
        san.push('#');
    } else if after.is_check() {
        san.push('+');
    }
    san
}
