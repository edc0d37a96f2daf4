//! Game state and the interaction controller
//!
//! # Module Organization
//!
//! - `controller` - the state machine driving the human/engine move cycle
//! - `fen` - opaque position encoding with the two read-only views
//! - `history` - append-only record of accepted move notations
//! - `promotion` - pending-promotion gate for pawns reaching the far rank
//! - `types` - coordinates, colors, statuses
//! - `error` - game-level error taxonomy

pub mod controller;
pub mod error;
pub mod fen;
pub mod history;
pub mod promotion;
pub mod types;

pub use controller::{
    CycleOutcome, GameConfig, GameController, GestureOutcome, RejectReason, TurnOwner,
};
pub use error::{GameError, GameResult};
