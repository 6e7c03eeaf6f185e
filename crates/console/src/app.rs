//! Session driver: owns the state machine, the rules engine, and the API
//! clients, and routes completion events from spawned fetch tasks.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use chess_rules::BoardRules;
use replay_core::analysis::{AnalysisEntry, Completion, FetchTicket};
use replay_core::rules::MoveRequest;
use replay_core::session::{AnalysisState, GameSession};

use crate::clients::analysis::AnalysisEngineClient;
use crate::clients::best_move::BestMoveClient;
use crate::clients::notation::NotationParserClient;
use crate::config::Config;

/// Events posted back to the driver loop by spawned fetch tasks.
#[derive(Debug)]
pub enum AppEvent {
    AnalysisDone {
        ticket: FetchTicket,
        outcome: Result<AnalysisEntry, String>,
    },
}

pub struct App {
    session: GameSession,
    rules: BoardRules,
    parser: NotationParserClient,
    engine: AnalysisEngineClient,
    adviser: BestMoveClient,
    config: Config,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(config: Config) -> (Self, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Self {
            session: GameSession::new(),
            rules: BoardRules::new(),
            parser: NotationParserClient::new(&config.api_base_url),
            engine: AnalysisEngineClient::new(&config.api_base_url),
            adviser: BestMoveClient::new(&config.api_base_url),
            config,
            events: tx,
        };
        (app, rx)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn take_status(&mut self) -> Option<String> {
        self.session.take_status()
    }

    /// Log whether the API is reachable. Not fatal either way; every later
    /// request carries its own error handling.
    pub async fn probe_health(&self) {
        match self.engine.health().await {
            Ok(()) => info!(api = %self.config.api_base_url, "API reachable"),
            Err(detail) => {
                warn!(api = %self.config.api_base_url, detail = %detail, "API unreachable")
            }
        }
    }

    /// Submit PGN text to the notation parser and install the result.
    /// Returns whether a game was loaded; on failure the session is reset
    /// with the parser's detail as the status message.
    pub async fn submit_pgn(&mut self, pgn: &str) -> bool {
        match self.parser.parse_pgn(pgn).await {
            Ok(game) => {
                info!(moves = game.moves.len(), "Notation parsed");
                if let Err(err) = self.session.load_game(game) {
                    warn!(error = %err, "Parser returned a malformed position list");
                    self.session
                        .reject_load(format!("Parser returned a malformed game: {err}"));
                    return false;
                }
                self.request_analysis();
                true
            }
            Err(detail) => {
                warn!(detail = %detail, "Notation parse failed");
                self.session.reject_load(detail);
                false
            }
        }
    }

    /// Kick off an analysis fetch for the current position unless one is
    /// cached or already in flight.
    pub fn request_analysis(&mut self) {
        let Some((ticket, fen)) = self.session.ensure_analysis() else {
            return;
        };
        debug!(index = ticket.index(), "Requesting analysis");

        let engine = self.engine.clone();
        let events = self.events.clone();
        let depth = self.config.analysis_depth;
        let multipv = self.config.analysis_multipv;
        tokio::spawn(async move {
            let outcome = engine.analyze(&fen, depth, multipv).await;
            // A closed channel means the driver is gone; nothing to do
            let _ = events.send(AppEvent::AnalysisDone { ticket, outcome });
        });
    }

    /// Apply a completion event from a fetch task.
    pub fn handle_event(&mut self, event: AppEvent) -> Completion {
        match event {
            AppEvent::AnalysisDone { ticket, outcome } => {
                let completion = self.session.complete_analysis(ticket, outcome);
                match completion {
                    Completion::Committed => debug!(index = ticket.index(), "Analysis committed"),
                    Completion::Failed => debug!(index = ticket.index(), "Analysis fetch failed"),
                    Completion::Discarded => {
                        debug!(index = ticket.index(), "Stale analysis discarded")
                    }
                }
                completion
            }
        }
    }

    pub fn step_forward(&mut self) -> bool {
        let changed = self.session.step_forward();
        if changed {
            self.request_analysis();
        }
        changed
    }

    pub fn step_back(&mut self) -> bool {
        let changed = self.session.step_back();
        if changed {
            self.request_analysis();
        }
        changed
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        let changed = self.session.go_to(index);
        if changed {
            self.request_analysis();
        }
        changed
    }

    /// Run a move request through the rules engine. An accepted move
    /// advances the timeline and refetches analysis for the new position;
    /// a rejected one changes nothing.
    pub fn play_request(&mut self, request: &MoveRequest) -> bool {
        let played = self.session.play_move(&self.rules, request);
        if played {
            self.request_analysis();
        }
        played
    }

    /// Play the rank-th recommendation (1-based) from the current analysis.
    pub fn play_suggestion(&mut self, rank: usize) -> Result<(), String> {
        let uci = match self.session.analysis_state() {
            AnalysisState::Ready(entry) => {
                match rank.checked_sub(1).and_then(|i| entry.lines.get(i)) {
                    Some(line) => line.uci.clone(),
                    None => return Err(format!("No line {rank} in the current analysis")),
                }
            }
            _ => return Err("No analysis for this position yet".to_string()),
        };
        let request = MoveRequest::from_uci(&uci)
            .ok_or_else(|| format!("Engine line has an unusable move: {uci}"))?;
        if self.play_request(&request) {
            Ok(())
        } else {
            Err(format!("Engine suggestion {uci} was rejected"))
        }
    }

    /// One-shot best-move request for the current position. Touches neither
    /// the timeline nor the cache.
    pub async fn best_move(&self) -> Result<String, String> {
        let reply = self
            .adviser
            .best_move(
                self.session.timeline().current_fen(),
                self.config.analysis_depth,
            )
            .await?;
        Ok(format!("Best move: {} ({})", reply.san, reply.uci))
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.request_analysis();
    }
}
