//! FEN position handling
//!
//! The authoritative position is an opaque FEN string: the controller never
//! edits it and never derives legality from it. The two read-only views here
//! (side to move, piece placement) exist only for turn gating, promotion
//! gesture detection, and board rendering.

use crate::game::types::{Color, Square};
use std::fmt;

/// Canonical encoding of full board state, sufficient to resume play
///
/// Treated as an immutable value; every accepted move replaces the whole
/// position with the one returned by the rules service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen(String);

/// The fixed starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Fen {
    pub fn new(fen: impl Into<String>) -> Self {
        Fen(fen.into())
    }

    /// The starting position of a new game
    pub fn start() -> Self {
        Fen(START_FEN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Which side moves next, read from the second FEN field
    ///
    /// A position certified by the rules service always carries this field;
    /// anything malformed is treated as White to move rather than panicking.
    pub fn side_to_move(&self) -> Color {
        match self.0.split_whitespace().nth(1) {
            Some("b") => Color::Black,
            _ => Color::White,
        }
    }

    /// The piece on a square, as its FEN letter (uppercase white, lowercase
    /// black), or `None` for an empty square
    ///
    /// Reads the placement field only. This is board-shape inspection, not
    /// rules knowledge.
    pub fn piece_at(&self, square: Square) -> Option<char> {
        let placement = self.0.split_whitespace().next()?;
        // FEN rows run from rank 8 down to rank 1
        let row = placement.split('/').nth(7 - square.rank.index() as usize)?;

        let mut file = 0u8;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
            } else {
                if file == square.file.index() {
                    return Some(c);
                }
                file += 1;
            }
            if file > square.file.index() {
                break;
            }
        }
        None
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_start_position_side_to_move() {
        assert_eq!(Fen::start().side_to_move(), Color::White);
    }

    #[test]
    fn test_side_to_move_after_a_move() {
        let fen = Fen::new("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        assert_eq!(fen.side_to_move(), Color::Black);
    }

    #[test]
    fn test_piece_at_start_position() {
        let fen = Fen::start();
        assert_eq!(fen.piece_at(sq("e2")), Some('P'));
        assert_eq!(fen.piece_at(sq("e7")), Some('p'));
        assert_eq!(fen.piece_at(sq("a1")), Some('R'));
        assert_eq!(fen.piece_at(sq("d8")), Some('q'));
        assert_eq!(fen.piece_at(sq("e4")), None);
    }

    #[test]
    fn test_piece_at_with_mixed_row() {
        // Row with digits on both sides of a piece
        let fen = Fen::new("4k3/4P3/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(fen.piece_at(sq("e7")), Some('P'));
        assert_eq!(fen.piece_at(sq("d7")), None);
        assert_eq!(fen.piece_at(sq("f7")), None);
        assert_eq!(fen.piece_at(sq("e8")), Some('k'));
    }
}
