//! Engine service boundary
//!
//! The rules oracle and the move-search engine live behind one HTTP service
//! with two endpoints: `POST /bestmove` and `POST /move`. This module owns
//! the wire types for that contract and the [`EngineService`] trait the
//! controller is written against; [`HttpEngineService`] is the production
//! implementation and tests substitute scripted mocks.

mod client;

pub use client::HttpEngineService;

use crate::game::fen::Fen;
use crate::game::types::GameStatus;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised at the service boundary
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure reaching the service
    #[error("engine service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status
    #[error("engine service returned HTTP {status}")]
    Status { status: u16 },

    /// A reply was missing a field the contract requires in context
    /// (e.g. no resulting FEN on a legal apply)
    #[error("engine service reply missing required field `{field}`")]
    MissingField { field: &'static str },
}

/// Result type alias for service calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Engine evaluation as it appears on the wire
///
/// `mate` takes precedence over `cp` when present; the two are never
/// meaningful together.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScoreWire {
    pub cp: i32,
    #[serde(default)]
    pub mate: Option<i32>,
}

/// Best move as it appears on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct BestMoveWire {
    /// Long algebraic form, e.g. `e2e4` or `e7e8q`
    pub long: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub promo: Option<String>,
}

/// Reply to `POST /bestmove`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestMoveResponse {
    pub best_move: BestMoveWire,
    pub score: ScoreWire,
}

/// Reply to `POST /move`
///
/// When `legal` is false, `fen` and `last_move` are absent and the caller's
/// position must remain untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub legal: bool,
    #[serde(default)]
    pub fen: Option<String>,
    pub status: GameStatus,
    #[serde(default)]
    pub last_move: Option<String>,
}

/// The single seam between the controller and the remote service
///
/// Implementations must be safe to share across tasks; the controller holds
/// one behind an `Arc` and clones it into the spawned best-move query.
#[async_trait]
pub trait EngineService: Send + Sync {
    /// Ask for the engine's best move and evaluation at a position
    async fn best_move(&self, fen: &Fen, depth: u8) -> ApiResult<BestMoveResponse>;

    /// Submit a move in long algebraic form for legality check and apply
    async fn apply_move(&self, fen: &Fen, notation: &str) -> ApiResult<MoveResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_move_response_deserializes() {
        let json = r#"{
            "bestMove": {"long": "e7e8q", "from": "e7", "to": "e8", "promo": "q"},
            "score": {"cp": 320, "mate": null}
        }"#;
        let reply: BestMoveResponse = serde_json::from_str(json).unwrap();
        assert_eq!(reply.best_move.long, "e7e8q");
        assert_eq!(reply.best_move.promo.as_deref(), Some("q"));
        assert_eq!(reply.score.cp, 320);
        assert_eq!(reply.score.mate, None);
    }

    #[test]
    fn test_mate_score_deserializes() {
        let json = r#"{"cp": 0, "mate": 3}"#;
        let score: ScoreWire = serde_json::from_str(json).unwrap();
        assert_eq!(score.mate, Some(3));
    }

    #[test]
    fn test_illegal_move_response_has_no_fen() {
        let json = r#"{"legal": false, "fen": null, "status": "ongoing", "lastMove": null}"#;
        let reply: MoveResponse = serde_json::from_str(json).unwrap();
        assert!(!reply.legal);
        assert!(reply.fen.is_none());
        assert!(reply.last_move.is_none());
        assert_eq!(reply.status, GameStatus::Ongoing);
    }

    #[test]
    fn test_legal_move_response() {
        let json = r#"{
            "legal": true,
            "fen": "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "status": "ongoing",
            "lastMove": "e4"
        }"#;
        let reply: MoveResponse = serde_json::from_str(json).unwrap();
        assert!(reply.legal);
        assert_eq!(reply.last_move.as_deref(), Some("e4"));
    }
}
