//! Line-command parsing for the console.

use std::path::PathBuf;

use replay_core::rules::MoveRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Paste,
    Load(PathBuf),
    Next,
    Prev,
    Goto(usize),
    Move(MoveRequest),
    Play(usize),
    Best,
    Show,
    Reset,
    Help,
    Quit,
}

/// Parse one input line. `None` means the line was empty; unknown or
/// malformed commands come back as the message to print.
pub fn parse(line: &str) -> Option<Result<Command, String>> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    let rest: Vec<&str> = parts.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "paste" => Command::Paste,
        "load" => match rest.first() {
            Some(path) => Command::Load(PathBuf::from(path)),
            None => return Some(Err("Usage: load <file.pgn>".to_string())),
        },
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "goto" => match rest.first().and_then(|s| s.parse().ok()) {
            Some(index) => Command::Goto(index),
            None => return Some(Err("Usage: goto <ply>".to_string())),
        },
        "move" | "m" => return Some(parse_move(&rest)),
        "play" => match rest.first().and_then(|s| s.parse::<usize>().ok()) {
            Some(rank) if rank >= 1 => Command::Play(rank),
            _ => return Some(Err("Usage: play <line number>".to_string())),
        },
        "best" => Command::Best,
        "show" => Command::Show,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Some(Err(format!("Unknown command: {other} (try help)"))),
    };
    Some(Ok(command))
}

fn parse_move(rest: &[&str]) -> Result<Command, String> {
    match rest {
        [token] => MoveRequest::from_uci(token)
            .map(Command::Move)
            .ok_or_else(|| format!("Not a move: {token}")),
        [from, to] => Ok(Command::Move(MoveRequest::from_squares(from, to, None))),
        [from, to, piece] => match piece.chars().next() {
            Some(p) if piece.len() == 1 && "qrbnQRBN".contains(p) => {
                Ok(Command::Move(MoveRequest::from_squares(from, to, Some(p))))
            }
            _ => Err(format!("Not a promotion piece: {piece}")),
        },
        _ => Err("Usage: move <uci> | move <from> <to> [piece]".to_string()),
    }
}

pub const HELP: &str = "\
Commands:
  paste                paste PGN lines, end with a single . on its own line
  load <file>          load a PGN file
  next / prev          step through the game
  goto <ply>           jump to a position (0 = start)
  move <uci>           play a move, e.g. move e2e4 or move e7e8q
  move <from> <to> [piece]
  play <n>             play the n-th line of the current analysis
  best                 ask the engine for the best move here
  show                 redraw the current position
  reset                start over from the initial position
  quit                 leave";
