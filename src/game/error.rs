//! Error types for game logic
//!
//! Covers the two failures that can actually interrupt play: the service
//! being unreachable and the engine proposing a move the rules service
//! rejects. Out-of-turn gestures and the like are not errors; they surface
//! as rejection outcomes from the controller without touching state.

use crate::api::ApiError;

/// Errors that can occur while driving a game
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The rules service rejected a move the engine itself proposed.
    /// Indicates a desynchronization between client and service state;
    /// the opposing-move cycle halts rather than guessing a recovery.
    #[error("engine move {notation} rejected by the rules service")]
    EngineMoveRejected { notation: String },

    /// Requested search depth outside the supported range
    #[error("engine depth {depth} out of range ({min}-{max})")]
    DepthOutOfRange { depth: u8, min: u8, max: u8 },

    /// The engine service failed or returned a malformed reply.
    /// Recoverable: no durable state was touched and the caller may retry.
    #[error(transparent)]
    Service(#[from] ApiError),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
