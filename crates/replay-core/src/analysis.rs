//! Per-position analysis cache with staleness tracking for in-flight
//! fetches. Entries are keyed by cursor index; any timeline mutation clears
//! the whole cache, so an index always refers to the position it was cached
//! for.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One engine recommendation: a move in both notations plus its evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisLine {
    pub uci: String,
    pub san: String,
    pub score: String,
}

/// Engine output for a single position. `score` is the evaluation of the
/// best line, from the side to move's point of view, preformatted by the
/// engine service (`"0.35"`, `"Mate in 2"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    pub score: String,
    pub lines: Vec<AnalysisLine>,
}

/// Identifies one fetch. Ids increase monotonically; only the most recently
/// issued ticket is still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    id: u64,
    index: usize,
}

impl FetchTicket {
    /// Cursor index this fetch was issued for.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// What became of a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Result stored for the active position.
    Committed,
    /// Error recorded for the active position.
    Failed,
    /// Result arrived for a superseded request or a position no longer on
    /// screen, and was dropped.
    Discarded,
}

#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: HashMap<usize, AnalysisEntry>,
    in_flight: Option<FetchTicket>,
    next_id: u64,
    error: Option<(usize, String)>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&AnalysisEntry> {
        self.entries.get(&index)
    }

    /// Register a fetch for `index`, superseding any request still in
    /// flight. The superseded request is not aborted; its completion will
    /// simply be discarded.
    pub fn begin(&mut self, index: usize) -> FetchTicket {
        self.next_id += 1;
        let ticket = FetchTicket {
            id: self.next_id,
            index,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    /// Resolve a fetch. `active_index` is the cursor at completion time; the
    /// result only lands if this ticket is still the latest one AND its
    /// position is still the one on screen. Failures of abandoned requests
    /// are dropped without recording anything.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        active_index: usize,
        outcome: Result<AnalysisEntry, String>,
    ) -> Completion {
        let latest = self.in_flight == Some(ticket);
        if latest {
            self.in_flight = None;
        }
        if !latest || ticket.index != active_index {
            return Completion::Discarded;
        }
        match outcome {
            Ok(entry) => {
                self.entries.insert(ticket.index, entry);
                self.error = None;
                Completion::Committed
            }
            Err(detail) => {
                self.error = Some((ticket.index, detail));
                Completion::Failed
            }
        }
    }

    /// Whether the latest in-flight fetch targets `index`.
    pub fn pending_for(&self, index: usize) -> bool {
        self.in_flight.map(|t| t.index == index).unwrap_or(false)
    }

    /// Transient fetch error for `index`, if it is the position the error
    /// was recorded against.
    pub fn error_for(&self, index: usize) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|(i, _)| *i == index)
            .map(|(_, detail)| detail.as_str())
    }

    /// Forget the recorded error. Errors are scoped to the position they
    /// hit; navigation away dismisses them.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drop everything. A fetch begun before the clear can never commit
    /// after it.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.in_flight = None;
        self.error = None;
    }
}
