//! Movetext rendering from a SAN move list. Display only; the move list
//! itself stays authoritative.

/// Format moves as numbered movetext: `1. e4 e5 2. Nf3`.
pub fn movetext(moves: &[String]) -> String {
    let mut text = String::new();
    for (i, mv) in moves.iter().enumerate() {
        if i % 2 == 0 {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&format!("{}.", i / 2 + 1));
        }
        text.push(' ');
        text.push_str(mv);
    }
    text
}

/// Label for the ply that produced position `cursor`: `start` at the
/// beginning, then `1. e4`, `1... e5`, `2. Nf3` and so on.
pub fn ply_label(moves: &[String], cursor: usize) -> String {
    if cursor == 0 || cursor > moves.len() {
        return "start".to_string();
    }
    let number = (cursor + 1) / 2;
    if cursor % 2 == 1 {
        format!("{}. {}", number, moves[cursor - 1])
    } else {
        format!("{}... {}", number, moves[cursor - 1])
    }
}
