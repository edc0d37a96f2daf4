//! Pawn promotion gating
//!
//! When a pawn gesture reaches the far rank the move is held here until the
//! player picks a piece. The held move never touches the network; the apply
//! call happens only after `confirm_promotion`. There is at most one pending
//! promotion at a time and a promotion piece is never defaulted.

use crate::game::fen::Fen;
use crate::game::types::Square;

/// An origin/destination pair waiting on the player's promotion choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    pub from: Square,
    pub to: Square,
}

/// Slot holding the single pending promotion, if any
#[derive(Debug, Default)]
pub struct PendingPromotion {
    pending: Option<PendingMove>,
}

impl PendingPromotion {
    /// Record a promotion awaiting a choice; refused if one is already held
    pub fn request(&mut self, from: Square, to: Square) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(PendingMove { from, to });
        true
    }

    /// Take the held move on confirmation
    pub fn take(&mut self) -> Option<PendingMove> {
        self.pending.take()
    }

    /// Drop the held move without confirming (new game, cancellation)
    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Whether a gesture is a pawn reaching its far rank
///
/// White pawns promote on rank 8, black pawns on rank 1. Only the moving
/// piece's identity is checked here; whether the move is actually legal is
/// still the rules service's call.
pub fn is_promotion_move(fen: &Fen, from: Square, to: Square) -> bool {
    match fen.piece_at(from) {
        Some('P') => to.rank.index() == 7,
        Some('p') => to.rank.index() == 0,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_single_pending_promotion() {
        let mut promotion = PendingPromotion::default();
        assert!(promotion.request(sq("e7"), sq("e8")));
        assert!(promotion.is_pending());
        assert!(!promotion.request(sq("a7"), sq("a8")));

        let pending = promotion.take().unwrap();
        assert_eq!(pending.from, sq("e7"));
        assert_eq!(pending.to, sq("e8"));
        assert!(!promotion.is_pending());
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut promotion = PendingPromotion::default();
        promotion.request(sq("e7"), sq("e8"));
        promotion.clear();
        assert!(promotion.take().is_none());
    }

    #[test]
    fn test_white_pawn_on_seventh_promotes() {
        let fen = Fen::new("4k3/4P3/8/8/8/8/8/4K3 w - - 0 1");
        assert!(is_promotion_move(&fen, sq("e7"), sq("e8")));
        // Same pawn not reaching the far rank is no promotion
        assert!(!is_promotion_move(&fen, sq("e7"), sq("e6")));
    }

    #[test]
    fn test_black_pawn_on_second_promotes() {
        let fen = Fen::new("4k3/8/8/8/8/8/4p3/4K3 b - - 0 1");
        assert!(is_promotion_move(&fen, sq("e2"), sq("e1")));
    }

    #[test]
    fn test_non_pawn_never_promotes() {
        let fen = Fen::new("4k3/4R3/8/8/8/8/8/4K3 w - - 0 1");
        assert!(!is_promotion_move(&fen, sq("e7"), sq("e8")));
    }

    #[test]
    fn test_pawn_moves_from_start_are_not_promotions() {
        let fen = Fen::start();
        assert!(!is_promotion_move(&fen, sq("e2"), sq("e4")));
    }
}
