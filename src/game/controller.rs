//! Game interaction controller
//!
//! Owns the authoritative position and everything derived from it, and
//! drives the human-move / engine-reply cycle against the remote service.
//! All game state lives in this one aggregate so the invariants (single
//! authoritative FEN, derived turn ownership, append-only history, at most
//! one pending promotion) are checkable in one place.
//!
//! # Cycle shape
//!
//! A human gesture runs the apply protocol inline. If the game is still
//! ongoing and the new position puts the engine on move, the controller
//! spawns the best-move query as a background task and parks the tagged
//! reply slot; the shell later calls [`GameController::complete_engine_cycle`]
//! to consume it. Every spawned query carries the game generation current at
//! issue time, and a reply whose tag no longer matches is discarded without
//! touching state. That generation check is the safeguard against a reset
//! racing a slow reply.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, ApiResult, BestMoveResponse, EngineService, MoveResponse};
use crate::eval::Evaluation;
use crate::game::error::{GameError, GameResult};
use crate::game::fen::Fen;
use crate::game::history::MoveHistory;
use crate::game::promotion::{is_promotion_move, PendingPromotion};
use crate::game::types::{Color, GameStatus, PromotionPiece, Square};

/// Smallest search depth the service accepts
pub const MIN_DEPTH: u8 = 1;
/// Largest search depth offered to the user
pub const MAX_DEPTH: u8 = 6;

/// Player configuration, read by every engine call
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub user_plays_as: Color,
    pub engine_depth: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            user_plays_as: Color::White,
            engine_depth: 4,
        }
    }
}

/// Which side is entitled to move, derived from the position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOwner {
    Human,
    Engine,
}

/// Result of a human gesture or promotion confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Move accepted and applied; the engine cycle may now be running
    Applied,
    /// Pawn reached the far rank; a promotion choice is required before
    /// anything is sent to the service
    PromotionRequired,
    /// The rules service rejected the move; nothing changed
    Illegal,
    /// Input arrived at the wrong time; nothing changed
    Rejected(RejectReason),
}

/// Why a gesture was refused without being submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotYourTurn,
    GameOver,
    EngineThinking,
    PromotionPending,
    NoPromotionPending,
}

/// Result of consuming the parked engine reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Engine move applied; it is the human's turn again
    Applied,
    /// Reply belonged to an abandoned game and was discarded
    Stale,
    /// No engine cycle was outstanding
    Idle,
}

/// Parked reply slot for a spawned best-move query
struct EngineTask {
    /// Game generation at the time the query was issued
    generation: u64,
    /// Side the engine was asked to evaluate for (side to move at query time)
    for_side: Color,
    rx: oneshot::Receiver<ApiResult<BestMoveResponse>>,
}

/// The client-side authority over one game session
pub struct GameController {
    service: Arc<dyn EngineService>,
    fen: Fen,
    history: MoveHistory,
    status: GameStatus,
    promotion: PendingPromotion,
    config: GameConfig,
    evaluation: Option<Evaluation>,
    generation: u64,
    engine_task: Option<EngineTask>,
}

impl GameController {
    pub fn new(service: Arc<dyn EngineService>, config: GameConfig) -> Self {
        Self {
            service,
            fen: Fen::start(),
            history: MoveHistory::default(),
            status: GameStatus::Ongoing,
            promotion: PendingPromotion::default(),
            config,
            evaluation: None,
            generation: 0,
            engine_task: None,
        }
    }

    // ------------------------------------------------------------------
    // Read-only observable state
    // ------------------------------------------------------------------

    pub fn fen(&self) -> &Fen {
        &self.fen
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn promotion_pending(&self) -> bool {
        self.promotion.is_pending()
    }

    /// Derived from the position and the configured side, never stored
    pub fn turn_owner(&self) -> TurnOwner {
        if self.fen.side_to_move() == self.config.user_plays_as {
            TurnOwner::Human
        } else {
            TurnOwner::Engine
        }
    }

    /// Whether a best-move query for the current game is outstanding
    ///
    /// A parked reply from a previous generation does not count; it will be
    /// discarded whenever it is consumed.
    pub fn engine_thinking(&self) -> bool {
        self.engine_task
            .as_ref()
            .is_some_and(|task| task.generation == self.generation)
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Reset to the starting position and begin a fresh game
    ///
    /// Bumping the generation first is what invalidates any reply still in
    /// flight from the previous game. If the human plays Black the engine
    /// opens, so the opposing cycle starts immediately; otherwise the
    /// evaluation is refreshed (best effort, the score is advisory).
    pub async fn start_new_game(&mut self) {
        self.generation += 1;
        self.fen = Fen::start();
        self.history.clear();
        self.status = GameStatus::Ongoing;
        self.promotion.clear();
        self.evaluation = None;
        info!(generation = self.generation, "[CONTROLLER] new game");

        if self.config.user_plays_as == Color::Black {
            self.ensure_engine_cycle();
        } else if let Err(err) = self.request_evaluation().await {
            warn!("[CONTROLLER] initial evaluation unavailable: {err}");
        }
    }

    /// Change which side the human plays
    ///
    /// Turn ownership is derived, so this takes effect immediately; the
    /// shell should follow up with [`Self::ensure_engine_cycle`] in case the
    /// flip handed the move to the engine.
    pub fn configure_side(&mut self, side: Color) {
        self.config.user_plays_as = side;
        info!(%side, "[CONTROLLER] human now plays");
    }

    /// Change the search depth used for every engine call
    pub fn configure_depth(&mut self, depth: u8) -> GameResult<()> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            return Err(GameError::DepthOutOfRange {
                depth,
                min: MIN_DEPTH,
                max: MAX_DEPTH,
            });
        }
        self.config.engine_depth = depth;
        Ok(())
    }

    /// Query the engine's evaluation of the current position
    ///
    /// Updates only the stored score; position, history and turn ownership
    /// are untouched.
    pub async fn request_evaluation(&mut self) -> GameResult<()> {
        let for_side = self.fen.side_to_move();
        let reply = self
            .service
            .best_move(&self.fen, self.config.engine_depth)
            .await?;
        self.evaluation = Some(Evaluation {
            score: reply.score.into(),
            for_side,
        });
        Ok(())
    }

    /// Handle a drag-and-drop gesture from the board
    ///
    /// Gestures out of turn, after the game ended, or while the engine's
    /// reply is outstanding are rejected without any state change. A pawn
    /// reaching its far rank is held for a promotion choice and generates no
    /// network traffic.
    pub async fn submit_human_gesture(
        &mut self,
        from: Square,
        to: Square,
    ) -> GameResult<GestureOutcome> {
        if let Some(reason) = self.gesture_block() {
            debug!(%from, %to, ?reason, "[CONTROLLER] gesture rejected");
            return Ok(GestureOutcome::Rejected(reason));
        }
        if self.promotion.is_pending() {
            warn!("[CONTROLLER] gesture while promotion choice pending");
            return Ok(GestureOutcome::Rejected(RejectReason::PromotionPending));
        }

        if is_promotion_move(&self.fen, from, to) {
            self.promotion.request(from, to);
            info!(%from, %to, "[CONTROLLER] promotion choice required");
            return Ok(GestureOutcome::PromotionRequired);
        }

        self.apply_human_move(format!("{from}{to}")).await
    }

    /// Complete a held promotion with the player's piece choice
    ///
    /// Calling this with no promotion pending is an ordering error on the
    /// shell's side; it is logged and ignored.
    pub async fn confirm_promotion(&mut self, piece: PromotionPiece) -> GameResult<GestureOutcome> {
        if let Some(reason) = self.gesture_block() {
            debug!(?reason, "[CONTROLLER] promotion confirmation rejected");
            return Ok(GestureOutcome::Rejected(reason));
        }
        let Some(pending) = self.promotion.take() else {
            warn!("[CONTROLLER] promotion confirmed with none pending");
            return Ok(GestureOutcome::Rejected(RejectReason::NoPromotionPending));
        };

        self.apply_human_move(format!("{}{}{}", pending.from, pending.to, piece.to_char()))
            .await
    }

    /// Spawn the engine's best-move query if it is the engine's turn and no
    /// query is already running
    ///
    /// Returns whether a new query was started. Used internally after every
    /// handoff and by the shell after a side flip or a failed cycle; there is
    /// deliberately no automatic retry loop.
    pub fn ensure_engine_cycle(&mut self) -> bool {
        if self.status != GameStatus::Ongoing
            || self.turn_owner() != TurnOwner::Engine
            || self.engine_thinking()
        {
            return false;
        }
        self.begin_engine_cycle();
        true
    }

    /// Await and apply the outstanding engine reply
    ///
    /// A reply tagged with a stale generation is discarded silently. A
    /// current reply first refreshes the evaluation, then runs the engine's
    /// proposed move through the same apply protocol as a human move; the
    /// rules service rejecting it is a desynchronization fault that halts
    /// the cycle.
    pub async fn complete_engine_cycle(&mut self) -> GameResult<CycleOutcome> {
        let Some(task) = self.engine_task.take() else {
            return Ok(CycleOutcome::Idle);
        };

        let reply = match task.rx.await {
            Ok(reply) => reply,
            Err(_) => {
                warn!("[ENGINE] best-move task dropped before replying");
                return Ok(CycleOutcome::Idle);
            }
        };

        if task.generation != self.generation {
            debug!(
                reply_generation = task.generation,
                current_generation = self.generation,
                "[ENGINE] discarding stale best-move reply"
            );
            return Ok(CycleOutcome::Stale);
        }

        let best = reply?;
        self.evaluation = Some(Evaluation {
            score: best.score.into(),
            for_side: task.for_side,
        });

        let notation = best.best_move.long;
        info!(%notation, "[ENGINE] best move received");

        let response = self.service.apply_move(&self.fen, &notation).await?;
        if !response.legal {
            error!(%notation, "[ENGINE] rules service rejected engine move; halting cycle");
            return Err(GameError::EngineMoveRejected { notation });
        }
        self.adopt(response)?;
        Ok(CycleOutcome::Applied)
    }

    // ------------------------------------------------------------------
    // Apply protocol
    // ------------------------------------------------------------------

    /// Why human input is currently refused, if it is
    fn gesture_block(&self) -> Option<RejectReason> {
        if self.engine_thinking() {
            Some(RejectReason::EngineThinking)
        } else if self.status != GameStatus::Ongoing {
            Some(RejectReason::GameOver)
        } else if self.turn_owner() != TurnOwner::Human {
            Some(RejectReason::NotYourTurn)
        } else {
            None
        }
    }

    /// Submit a human move to the service and hand off to the engine
    async fn apply_human_move(&mut self, notation: String) -> GameResult<GestureOutcome> {
        let response = self.service.apply_move(&self.fen, &notation).await?;
        if !response.legal {
            info!(%notation, "[CONTROLLER] illegal move");
            return Ok(GestureOutcome::Illegal);
        }
        self.adopt(response)?;

        // One-shot handoff: applying the engine's reply flips the side back
        // to the human, so the cycle cannot recurse
        self.ensure_engine_cycle();
        Ok(GestureOutcome::Applied)
    }

    /// Adopt a legal apply response as the new authoritative state
    fn adopt(&mut self, response: MoveResponse) -> GameResult<()> {
        let fen = response
            .fen
            .ok_or(ApiError::MissingField { field: "fen" })?;
        let notation = response
            .last_move
            .ok_or(ApiError::MissingField { field: "lastMove" })?;

        self.fen = Fen::new(fen);
        self.history.add_move(notation);
        self.status = response.status;
        debug!(fen = %self.fen, status = %self.status, "[CONTROLLER] position adopted");
        Ok(())
    }

    /// Spawn the best-move query as a background task, tagged with the
    /// current generation
    fn begin_engine_cycle(&mut self) {
        let (tx, rx) = oneshot::channel();
        let service = Arc::clone(&self.service);
        let fen = self.fen.clone();
        let depth = self.config.engine_depth;
        let generation = self.generation;
        let for_side = self.fen.side_to_move();

        info!(generation, depth, "[ENGINE] best-move query spawned");
        tokio::spawn(async move {
            let reply = service.best_move(&fen, depth).await;
            // The receiver is gone after a reset; nothing left to deliver to
            let _ = tx.send(reply);
        });

        self.engine_task = Some(EngineTask {
            generation,
            for_side,
            rx,
        });
    }
}
