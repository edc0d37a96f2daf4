//! Move history tracking
//!
//! Maintains a chronological record of the notations the rules service
//! reported for each accepted move. The list is append-only for the lifetime
//! of one game and is only ever emptied by starting a new game.

/// Ordered record of all accepted moves in the current game
///
/// Index 0 is White's first move, index 1 Black's reply, and so on.
#[derive(Debug, Default)]
pub struct MoveHistory {
    moves: Vec<String>,
}

impl MoveHistory {
    /// Append a move's notation after a successful apply
    pub fn add_move(&mut self, notation: String) {
        self.moves.push(notation);
    }

    /// The most recent move, if any
    pub fn last_move(&self) -> Option<&str> {
        self.moves.last().map(String::as_str)
    }

    /// Number of half-moves (ply) recorded
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Clear all move history when starting a new game
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(String::as_str)
    }

    /// Moves formatted with pair numbering for display
    ///
    /// White moves render as `1. e4`, Black replies as `1... e5`.
    pub fn numbered(&self) -> Vec<String> {
        self.moves
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let number = i / 2 + 1;
                if i % 2 == 0 {
                    format!("{number}. {m}")
                } else {
                    format!("{number}... {m}")
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_starts_empty() {
        let history = MoveHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.last_move(), None);
    }

    #[test]
    fn test_add_and_last_move() {
        let mut history = MoveHistory::default();
        history.add_move("e4".to_string());
        history.add_move("e5".to_string());

        assert_eq!(history.len(), 2);
        assert_eq!(history.last_move(), Some("e5"));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut history = MoveHistory::default();
        history.add_move("e4".to_string());
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_numbered_pairs() {
        let mut history = MoveHistory::default();
        for m in ["e4", "e5", "Nf3"] {
            history.add_move(m.to_string());
        }

        assert_eq!(
            history.numbered(),
            vec!["1. e4".to_string(), "1... e5".to_string(), "2. Nf3".to_string()]
        );
    }
}
