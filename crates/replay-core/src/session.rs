//! The owned state behind one replay session: timeline, analysis cache,
//! recorded outcome, and a one-shot status message slot.

use crate::analysis::{AnalysisCache, AnalysisEntry, Completion, FetchTicket};
use crate::game::{GameOutcome, ParsedGame};
use crate::notation;
use crate::rules::{MoveRequest, RulesEngine};
use crate::timeline::{Timeline, TimelineError};

/// Cache state for the position currently on screen.
#[derive(Debug)]
pub enum AnalysisState<'a> {
    Ready(&'a AnalysisEntry),
    Pending,
    Failed(&'a str),
    Absent,
}

#[derive(Debug, Default)]
pub struct GameSession {
    timeline: Timeline,
    cache: AnalysisCache,
    outcome: Option<GameOutcome>,
    status: Option<String>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session: single starting position, nothing cached.
    pub fn reset(&mut self) {
        self.timeline.reset();
        self.cache.clear();
        self.outcome = None;
        self.status = None;
    }

    /// Install a parsed game, replacing all current state. The cursor lands
    /// on the starting position.
    pub fn load_game(&mut self, game: ParsedGame) -> Result<(), TimelineError> {
        self.timeline.replace(game.fens, game.moves)?;
        self.cache.clear();
        self.outcome = game.outcome;
        self.status = None;
        Ok(())
    }

    /// Notation could not be parsed: back to a clean starting position, with
    /// the parser's detail as the status message.
    pub fn reject_load(&mut self, detail: String) {
        self.timeline.reset();
        self.cache.clear();
        self.outcome = None;
        self.status = Some(detail);
    }

    /// Move the cursor, clamped. A change dismisses any fetch error, which
    /// is scoped to the position it happened on.
    pub fn go_to(&mut self, index: usize) -> bool {
        let changed = self.timeline.move_to(index);
        if changed {
            self.cache.clear_error();
        }
        changed
    }

    pub fn step_forward(&mut self) -> bool {
        self.go_to(self.timeline.cursor() + 1)
    }

    pub fn step_back(&mut self) -> bool {
        self.go_to(self.timeline.cursor().saturating_sub(1))
    }

    /// Run a move request through the rules engine and, if accepted, append
    /// it at the cursor. Everything cached becomes invalid; a recorded
    /// outcome no longer describes the line on screen and is dropped.
    /// Rejection leaves the session untouched and returns `false`.
    pub fn play_move<R: RulesEngine>(&mut self, rules: &R, request: &MoveRequest) -> bool {
        let accepted = match rules.try_move(self.timeline.current_fen(), request) {
            Some(accepted) => accepted,
            None => return false,
        };
        self.timeline.append(accepted.san, accepted.fen);
        self.cache.clear();
        self.outcome = None;
        true
    }

    pub fn notation(&self) -> String {
        notation::movetext(self.timeline.moves())
    }

    /// Label of the ply behind the current position (`start`, `1. e4`, ...).
    pub fn current_label(&self) -> String {
        notation::ply_label(self.timeline.moves(), self.timeline.cursor())
    }

    /// Begin a fetch for the current position if nothing is cached or
    /// pending for it. Returns the ticket plus the FEN to analyze.
    pub fn ensure_analysis(&mut self) -> Option<(FetchTicket, String)> {
        let index = self.timeline.cursor();
        if self.cache.get(index).is_some() || self.cache.pending_for(index) {
            return None;
        }
        let ticket = self.cache.begin(index);
        Some((ticket, self.timeline.current_fen().to_string()))
    }

    /// Resolve a fetch against the cursor as it stands right now.
    pub fn complete_analysis(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<AnalysisEntry, String>,
    ) -> Completion {
        self.cache.complete(ticket, self.timeline.cursor(), outcome)
    }

    pub fn analysis_state(&self) -> AnalysisState<'_> {
        let index = self.timeline.cursor();
        if let Some(entry) = self.cache.get(index) {
            return AnalysisState::Ready(entry);
        }
        if self.cache.pending_for(index) {
            return AnalysisState::Pending;
        }
        if let Some(detail) = self.cache.error_for(index) {
            return AnalysisState::Failed(detail);
        }
        AnalysisState::Absent
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    pub fn set_status(&mut self, message: String) {
        self.status = Some(message);
    }

    /// Drain the pending status message, if any.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }
}
