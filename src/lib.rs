// Module declarations
pub mod api;
pub mod eval;
pub mod game;
pub mod shell;

// Main entry points
pub use api::{EngineService, HttpEngineService};
pub use game::{GameConfig, GameController};
