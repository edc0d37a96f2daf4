//! Terminal presentation shell
//!
//! Renders the controller's observable state and parses user commands. The
//! shell never mutates game state directly; everything goes through the
//! controller's operations.

use crate::eval::{normalize, Evaluation};
use crate::game::fen::Fen;
use crate::game::history::MoveHistory;
use crate::game::types::{Color, PromotionPiece, Square};

/// Width of the evaluation gauge in characters
const EVAL_GAUGE_WIDTH: usize = 21;

/// A parsed line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    /// A move gesture in long algebraic form, e.g. `e2e4`
    Move(Square, Square),
    /// A promotion piece choice (`q`, `r`, `b`, `n`)
    Promote(PromotionPiece),
    NewGame,
    Depth(u8),
    Side(Color),
    Eval,
    Help,
    Quit,
}

/// Parse one trimmed input line
pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Err("empty input; type `help` for commands".to_string());
    };

    match word {
        "new" => Ok(ShellCommand::NewGame),
        "eval" => Ok(ShellCommand::Eval),
        "help" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        "depth" => {
            let arg = words.next().ok_or("usage: depth <1-6>")?;
            let depth: u8 = arg.parse().map_err(|_| format!("not a depth: {arg}"))?;
            Ok(ShellCommand::Depth(depth))
        }
        "side" => {
            let arg = words.next().ok_or("usage: side <white|black>")?;
            match arg {
                "white" | "w" => Ok(ShellCommand::Side(Color::White)),
                "black" | "b" => Ok(ShellCommand::Side(Color::Black)),
                other => Err(format!("not a side: {other}")),
            }
        }
        // Byte length is only a safe slice boundary for ASCII words
        mv if mv.len() == 4 && mv.is_ascii() => {
            let from = Square::from_algebraic(&mv[..2])
                .ok_or_else(|| format!("bad origin square in {mv}"))?;
            let to = Square::from_algebraic(&mv[2..])
                .ok_or_else(|| format!("bad destination square in {mv}"))?;
            Ok(ShellCommand::Move(from, to))
        }
        choice if choice.len() == 1 && choice.is_ascii() => {
            let c = choice.chars().next().unwrap_or(' ');
            PromotionPiece::from_char(c)
                .map(ShellCommand::Promote)
                .ok_or_else(|| format!("unknown command: {choice}"))
        }
        other => Err(format!("unknown command: {other}")),
    }
}

/// Render the position as an ASCII board with coordinates
///
/// The board is drawn from the human player's point of view: rank 1 at the
/// bottom for White, rank 8 at the bottom for Black.
pub fn render_board(fen: &Fen, point_of_view: Color) -> String {
    let mut out = String::new();
    let ranks: Vec<u8> = match point_of_view {
        Color::White => (0..8).rev().collect(),
        Color::Black => (0..8).collect(),
    };
    let files: Vec<u8> = match point_of_view {
        Color::White => (0..8).collect(),
        Color::Black => (0..8).rev().collect(),
    };

    for &rank in &ranks {
        out.push_str("  +---+---+---+---+---+---+---+---+\n");
        out.push_str(&format!("{} |", rank + 1));
        for &file in &files {
            let square = Square {
                file: crate::game::types::File(file),
                rank: crate::game::types::Rank(rank),
            };
            let piece = fen.piece_at(square).unwrap_or(' ');
            out.push_str(&format!(" {piece} |"));
        }
        out.push('\n');
    }
    out.push_str("  +---+---+---+---+---+---+---+---+\n   ");
    for &file in &files {
        out.push_str(&format!(" {}  ", (b'a' + file) as char));
    }
    out.push('\n');
    out
}

/// Render the evaluation as a label plus a fixed-width gauge
///
/// The gauge runs Black's side to White's side left to right; the marker
/// sits at the normalized bar position.
pub fn render_eval(evaluation: Option<&Evaluation>) -> String {
    let Some(evaluation) = evaluation else {
        return "eval: (none)".to_string();
    };
    let display = normalize(evaluation);
    let marker = ((display.bar * (EVAL_GAUGE_WIDTH - 1) as f32).round() as usize)
        .min(EVAL_GAUGE_WIDTH - 1);

    let mut gauge = String::with_capacity(EVAL_GAUGE_WIDTH + 2);
    gauge.push('[');
    for i in 0..EVAL_GAUGE_WIDTH {
        if i == marker {
            gauge.push('o');
        } else if i == EVAL_GAUGE_WIDTH / 2 {
            gauge.push('|');
        } else {
            gauge.push('-');
        }
    }
    gauge.push(']');
    format!("eval: {gauge} {}", display.label)
}

/// Render the move list in numbered pairs, two columns wide
pub fn render_moves(history: &MoveHistory) -> String {
    if history.is_empty() {
        return "No moves yet".to_string();
    }
    history.numbered().join("  ")
}

/// One-line command summary for `help`
pub fn help_text() -> &'static str {
    "commands: <move> (e.g. e2e4), q/r/b/n (promotion choice), new, depth <1-6>, \
     side <white|black>, eval, quit"
}
