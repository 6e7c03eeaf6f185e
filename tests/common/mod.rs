use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position};

use console::config::Config;

/// Behaviour knobs for the stub engine, shared with the running server.
#[derive(Default)]
pub struct StubState {
    /// Fens the engine sits on before answering.
    slow: Mutex<HashMap<String, Duration>>,
    /// Fens the engine refuses with HTTP 500.
    failing: Mutex<HashSet<String>>,
    /// Every fen received by /api/analyze_fen, in arrival order.
    analyzed: Mutex<Vec<String>>,
}

impl StubState {
    /// Delay analysis replies for `fen`.
    pub fn set_delay(&self, fen: &str, delay: Duration) {
        self.slow.lock().unwrap().insert(fen.to_string(), delay);
    }

    /// Make analysis of `fen` fail.
    pub fn set_failing(&self, fen: &str) {
        self.failing.lock().unwrap().insert(fen.to_string());
    }

    /// Let analysis of `fen` succeed again.
    pub fn clear_failing(&self, fen: &str) {
        self.failing.lock().unwrap().remove(fen);
    }

    /// Fens analyzed so far.
    pub fn analyzed_fens(&self) -> Vec<String> {
        self.analyzed.lock().unwrap().clone()
    }
}

/// Start an in-process Chess Out API stub on an ephemeral port. Returns the
/// base URL to point clients at, plus the shared behaviour knobs.
pub async fn spawn_stub() -> (String, Arc<StubState>) {
    let state = Arc::new(StubState::default());
    let router = Router::new()
        .route("/api/health", get(health))
        .route("/api/parse_pgn", post(parse_pgn))
        .route("/api/analyze_fen", post(analyze_fen))
        .route("/api/best_move", post(best_move))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Failed to read stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Stub server crashed");
    });

    (format!("http://{addr}"), state)
}

/// Build an app config pointing at the stub.
pub fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        analysis_depth: 10,
        analysis_multipv: 3,
    }
}

type ApiError = (StatusCode, Json<Value>);

fn detail(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "detail": message })))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn parse_pgn(Json(body): Json<Value>) -> Result<Json<Value>, ApiError> {
    let pgn = body["pgn"].as_str().unwrap_or_default();
    replay_pgn(pgn)
        .map(Json)
        .map_err(|message| detail(StatusCode::BAD_REQUEST, &message))
}

async fn analyze_fen(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let fen = body["fen"].as_str().unwrap_or_default().to_string();
    let multipv = body["multipv"].as_u64().unwrap_or(5) as usize;
    state.analyzed.lock().unwrap().push(fen.clone());

    let nap = state.slow.lock().unwrap().get(&fen).copied();
    if let Some(nap) = nap {
        tokio::time::sleep(nap).await;
    }
    if state.failing.lock().unwrap().contains(&fen) {
        return Err(detail(StatusCode::INTERNAL_SERVER_ERROR, "Engine unavailable"));
    }

    let pos = position(&fen).map_err(|message| detail(StatusCode::BAD_REQUEST, &message))?;
    let lines: Vec<Value> = pos
        .legal_moves()
        .iter()
        .take(multipv)
        .enumerate()
        .map(|(rank, &mv)| {
            json!({
                "uci": mv.to_uci(CastlingMode::Standard).to_string(),
                "san": San::from_move(&pos, mv).to_string(),
                "score": format!("{:.2}", 0.5 - 0.1 * rank as f64),
            })
        })
        .collect();
    let score = lines
        .first()
        .and_then(|line| line["score"].as_str())
        .unwrap_or("0.00")
        .to_string();

    Ok(Json(json!({ "score": score, "lines": lines })))
}

async fn best_move(Json(body): Json<Value>) -> Result<Json<Value>, ApiError> {
    let fen = body["fen"].as_str().unwrap_or_default();
    let pos = position(fen).map_err(|message| detail(StatusCode::BAD_REQUEST, &message))?;
    let mv = pos
        .legal_moves()
        .first()
        .copied()
        .ok_or_else(|| detail(StatusCode::BAD_REQUEST, "No legal moves"))?;
    Ok(Json(json!({
        "uci": mv.to_uci(CastlingMode::Standard).to_string(),
        "san": San::from_move(&pos, mv).to_string(),
    })))
}

/// Minimal PGN replay: bracket headers skipped, movetext replayed move by
/// move so the returned fens and sans are internally consistent.
fn replay_pgn(pgn: &str) -> Result<Value, String> {
    let mut pos = Chess::default();
    let mut fens = vec![fen_text(&pos)];
    let mut moves: Vec<String> = Vec::new();
    let mut result: Option<String> = None;

    for line in pgn.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('[') {
            continue;
        }
        for token in line.split_whitespace() {
            if token.chars().all(|c| c.is_ascii_digit() || c == '.') {
                continue;
            }
            if matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*") {
                result = Some(token.to_string());
                continue;
            }
            if token.starts_with('$') {
                continue;
            }
            let bare = token.trim_end_matches(['+', '#', '!', '?']);
            let san: San = bare
                .parse()
                .map_err(|_| format!("Invalid PGN token: {token}"))?;
            let mv = san
                .to_move(&pos)
                .map_err(|_| format!("Illegal move: {token}"))?;
            let mut text = San::from_move(&pos, mv).to_string();
            pos = pos.play(mv).map_err(|_| format!("Illegal move: {token}"))?;
            if pos.is_checkmate() {
                text.push('#');
            } else if pos.is_check() {
                text.push('+');
            }
            moves.push(text);
            fens.push(fen_text(&pos));
        }
    }

    if moves.is_empty() {
        return Err("No moves found in PGN".to_string());
    }

    let (verdict, reason) = if pos.is_checkmate() {
        let verdict = match pos.turn() {
            Color::White => "Black wins",
            Color::Black => "White wins",
        };
        (Some(verdict), Some("Checkmate"))
    } else if pos.is_stalemate() {
        (Some("Draw"), Some("Stalemate"))
    } else {
        (None, None)
    };
    let result = result.or_else(|| {
        verdict.map(|verdict| {
            match verdict {
                "White wins" => "1-0",
                "Black wins" => "0-1",
                _ => "1/2-1/2",
            }
            .to_string()
        })
    });

    Ok(json!({
        "start_fen": fens[0],
        "fens": fens,
        "moves": moves,
        "result": result,
        "outcome": verdict,
        "outcome_reason": reason,
        "outcome_details": null,
    }))
}

fn position(fen: &str) -> Result<Chess, String> {
    let parsed: Fen = fen.parse().map_err(|_| format!("Invalid FEN: {fen}"))?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|_| format!("Invalid FEN: {fen}"))
}

fn fen_text(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}
