//! Text rendering for session state.

use replay_core::session::{AnalysisState, GameSession};

const RULE_WIDTH: usize = 60;

/// Render the full state block: position, movetext, outcome, analysis.
pub fn render(session: &GameSession) -> String {
    let timeline = session.timeline();
    let mut out = String::new();

    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "Position {} of {}: {}\n",
        timeline.cursor(),
        timeline.move_count(),
        session.current_label()
    ));
    out.push_str(&format!("FEN: {}\n", timeline.current_fen()));

    if timeline.move_count() > 0 {
        out.push_str(&format!(
            "Moves: {}\n",
            marked_movetext(timeline.moves(), timeline.cursor())
        ));
    }

    if let Some(outcome) = session.outcome() {
        out.push_str(&format!("Result: {}\n", outcome.describe()));
        if let Some(details) = &outcome.details {
            out.push_str(&format!("        {details}\n"));
        }
    }

    out.push_str(&render_analysis(session));
    out.push_str(&"=".repeat(RULE_WIDTH));
    out
}

/// Movetext with the cursor's move bracketed: `1. e4 [e5] 2. Nf3`.
fn marked_movetext(moves: &[String], cursor: usize) -> String {
    let mut text = String::new();
    for (i, mv) in moves.iter().enumerate() {
        if i % 2 == 0 {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&format!("{}.", i / 2 + 1));
        }
        text.push(' ');
        if i + 1 == cursor {
            text.push('[');
            text.push_str(mv);
            text.push(']');
        } else {
            text.push_str(mv);
        }
    }
    text
}

fn render_analysis(session: &GameSession) -> String {
    match session.analysis_state() {
        AnalysisState::Ready(entry) => {
            let mut block = format!("Eval: {}\n", entry.score);
            for (i, line) in entry.lines.iter().enumerate() {
                block.push_str(&format!(
                    "  {}. {} ({})  [{}]\n",
                    i + 1,
                    line.san,
                    line.score,
                    line.uci
                ));
            }
            block
        }
        AnalysisState::Pending => "Eval: thinking...\n".to_string(),
        AnalysisState::Failed(detail) => format!("Eval: unavailable ({detail})\n"),
        AnalysisState::Absent => String::new(),
    }
}
