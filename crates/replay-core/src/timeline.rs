//! Linear position history with a movable cursor.

use thiserror::Error;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Error, Debug, PartialEq)]
pub enum TimelineError {
    #[error("position list must be one longer than move list (got {fens} positions, {moves} moves)")]
    LengthMismatch { fens: usize, moves: usize },
}

/// Ordered positions and the moves between them. `fens` is always one longer
/// than `moves`; `fens[i+1]` is the position after playing `moves[i]`.
#[derive(Debug, Clone)]
pub struct Timeline {
    fens: Vec<String>,
    moves: Vec<String>,
    cursor: usize,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            fens: vec![START_FEN.to_string()],
            moves: Vec::new(),
            cursor: 0,
        }
    }

    /// Drop all history and return to the single starting position.
    pub fn reset(&mut self) {
        self.fens = vec![START_FEN.to_string()];
        self.moves.clear();
        self.cursor = 0;
    }

    /// Substitute the whole history and rewind the cursor to the start.
    pub fn replace(&mut self, fens: Vec<String>, moves: Vec<String>) -> Result<(), TimelineError> {
        if fens.len() != moves.len() + 1 {
            return Err(TimelineError::LengthMismatch {
                fens: fens.len(),
                moves: moves.len(),
            });
        }
        self.fens = fens;
        self.moves = moves;
        self.cursor = 0;
        Ok(())
    }

    /// Move the cursor, clamped to `[0, move_count]`. Returns whether it
    /// actually moved.
    pub fn move_to(&mut self, index: usize) -> bool {
        let clamped = index.min(self.moves.len());
        let changed = clamped != self.cursor;
        self.cursor = clamped;
        changed
    }

    /// Record a move played from the current position. Any continuation past
    /// the cursor is discarded first, then the cursor advances onto the new
    /// position.
    pub fn append(&mut self, san: String, fen: String) {
        self.fens.truncate(self.cursor + 1);
        self.moves.truncate(self.cursor);
        self.moves.push(san);
        self.fens.push(fen);
        self.cursor += 1;
    }

    pub fn current_fen(&self) -> &str {
        &self.fens[self.cursor]
    }

    /// SAN of the move that produced the current position. `None` at the
    /// starting position.
    pub fn current_move(&self) -> Option<&str> {
        if self.cursor == 0 {
            None
        } else {
            Some(&self.moves[self.cursor - 1])
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn fens(&self) -> &[String] {
        &self.fens
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor == self.moves.len()
    }
}
