//! Move-request normalization and the legality-check boundary.

/// A move attempt: source and target squares plus an optional promotion
/// piece letter. Square-pair input and engine suggestion tokens both
/// normalize into this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
    pub promotion: Option<char>,
}

impl MoveRequest {
    pub fn from_squares(from: &str, to: &str, promotion: Option<char>) -> Self {
        Self {
            from: from.trim().to_ascii_lowercase(),
            to: to.trim().to_ascii_lowercase(),
            promotion: promotion.map(|p| p.to_ascii_lowercase()),
        }
    }

    /// Parse a UCI token like `e2e4` or `e7e8q`.
    pub fn from_uci(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_lowercase();
        if !token.is_ascii() || (token.len() != 4 && token.len() != 5) {
            return None;
        }
        let from = &token[..2];
        let to = &token[2..4];
        if !is_square(from) || !is_square(to) {
            return None;
        }
        let promotion = token[4..].chars().next();
        if let Some(p) = promotion {
            if !matches!(p, 'q' | 'r' | 'b' | 'n') {
                return None;
            }
        }
        Some(Self {
            from: from.to_string(),
            to: to.to_string(),
            promotion,
        })
    }

    /// The request as a UCI token.
    pub fn uci(&self) -> String {
        match self.promotion {
            Some(p) => format!("{}{}{}", self.from, self.to, p),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

fn is_square(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 2
        && bytes[0].is_ascii_lowercase()
        && bytes[0] <= b'h'
        && (b'1'..=b'8').contains(&bytes[1])
}

/// A request the rules engine accepted: the SAN token it resolved to and the
/// position after playing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedMove {
    pub san: String,
    pub fen: String,
}

/// Legality checking and position derivation. Rejection is `None`; illegal
/// input never carries more detail than that.
pub trait RulesEngine {
    fn try_move(&self, fen: &str, request: &MoveRequest) -> Option<AcceptedMove>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_uci_plain() {
        let request = MoveRequest::from_uci("e2e4").unwrap();
        assert_eq!(request.from, "e2");
        assert_eq!(request.to, "e4");
        assert_eq!(request.promotion, None);
        assert_eq!(request.uci(), "e2e4");
    }

    #[test]
    fn test_from_uci_promotion() {
        let request = MoveRequest::from_uci("e7e8q").unwrap();
        assert_eq!(request.promotion, Some('q'));
        assert_eq!(request.uci(), "e7e8q");
    }

    #[test]
    fn test_from_uci_uppercase_is_normalized() {
        let request = MoveRequest::from_uci("E2E4").unwrap();
        assert_eq!(request.uci(), "e2e4");
    }

    #[test]
    fn test_from_uci_rejects_garbage() {
        assert_eq!(MoveRequest::from_uci("e2"), None);
        assert_eq!(MoveRequest::from_uci("e2e9"), None);
        assert_eq!(MoveRequest::from_uci("i2i4"), None);
        assert_eq!(MoveRequest::from_uci("e7e8k"), None);
        assert_eq!(MoveRequest::from_uci("e2e4e5"), None);
    }

    #[test]
    fn test_from_squares_normalizes() {
        let request = MoveRequest::from_squares(" E2 ", "e4", Some('Q'));
        assert_eq!(request.from, "e2");
        assert_eq!(request.to, "e4");
        assert_eq!(request.promotion, Some('q'));
    }
}
