//! Score normalization for display
//!
//! Maps an engine evaluation to a label and a bounded bar position. Pure and
//! total: every valid score produces an output, with centipawn magnitudes
//! saturating at [`SATURATION_CP`] and mate scores pinned to the extremes.

use crate::api::ScoreWire;
use crate::game::types::Color;

/// Centipawn magnitude at which the display bar saturates
pub const SATURATION_CP: i32 = 1000;

/// An engine evaluation: either a centipawn balance or a forced-mate
/// distance, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Centipawns(i32),
    MateIn(i32),
}

impl From<ScoreWire> for Score {
    fn from(wire: ScoreWire) -> Self {
        match wire.mate {
            Some(mate) => Score::MateIn(mate),
            None => Score::Centipawns(wire.cp),
        }
    }
}

/// A score together with the side it was computed for
///
/// The engine evaluates from the perspective of the side to move at query
/// time; the bar orientation below needs to know which side that was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub score: Score,
    pub for_side: Color,
}

/// Display form of an evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct EvalDisplay {
    /// Human-readable score, e.g. `+42`, `-310`, `Mate in 3`
    pub label: String,
    /// Position on a linear scale in `[0.0, 1.0]`, oriented so that 1.0 is
    /// winning for White and 0.5 is balance
    pub bar: f32,
}

/// Normalize an evaluation for display
pub fn normalize(eval: &Evaluation) -> EvalDisplay {
    let label = match eval.score {
        Score::MateIn(mate) => format!("Mate in {}", mate.abs()),
        Score::Centipawns(cp) if cp > 0 => format!("+{cp}"),
        Score::Centipawns(cp) => cp.to_string(),
    };

    let bar = match eval.score {
        Score::MateIn(mate) => {
            // A non-positive mate distance means the evaluated side is the
            // one getting mated
            let white_winning = (mate > 0) == (eval.for_side == Color::White);
            if white_winning {
                1.0
            } else {
                0.0
            }
        }
        Score::Centipawns(cp) => {
            let oriented = match eval.for_side {
                Color::White => cp,
                Color::Black => -cp,
            };
            let clamped = oriented.clamp(-SATURATION_CP, SATURATION_CP);
            0.5 + clamped as f32 / (2 * SATURATION_CP) as f32
        }
    };

    EvalDisplay { label, bar }
}
