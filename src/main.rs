use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chess_client::game::controller::{GestureOutcome, RejectReason, TurnOwner};
use chess_client::game::types::{Color, GameStatus};
use chess_client::shell::{self, ShellCommand};
use chess_client::{GameConfig, GameController, HttpEngineService};

/// Terminal chess client for a remote engine service
#[derive(Parser, Debug)]
#[command(name = "chess_client", version, about)]
struct Cli {
    /// Base URL of the engine service
    #[arg(long, default_value = "http://localhost:8080")]
    server: String,

    /// Engine search depth (1-6)
    #[arg(long, default_value_t = 4)]
    depth: u8,

    /// Side the human plays
    #[arg(long, value_enum, default_value_t = Color::White)]
    side: Color,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let service = Arc::new(HttpEngineService::new(&cli.server));
    let config = GameConfig {
        user_plays_as: cli.side,
        engine_depth: 4,
    };

    let mut controller = GameController::new(service, config);
    controller.configure_depth(cli.depth)?;
    controller.start_new_game().await;

    run(&mut controller).await
}

async fn run(controller: &mut GameController) -> Result<()> {
    let stdin = io::stdin();
    println!("{}", shell::help_text());

    loop {
        // Re-issue the engine's move if a failed or discarded cycle left it
        // on move; one attempt per pass through the loop
        controller.ensure_engine_cycle();

        if controller.engine_thinking() {
            println!("Engine thinking...");
            match controller.complete_engine_cycle().await {
                Ok(_) => {}
                Err(err) => println!("Engine move failed: {err}"),
            }
        }

        render(controller);

        if controller.promotion_pending() {
            println!("Choose a promotion piece: q, r, b or n");
        }

        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match shell::parse_command(line.trim()) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Move(from, to) => {
                report_gesture(controller.submit_human_gesture(from, to).await);
            }
            ShellCommand::Promote(piece) => {
                report_gesture(controller.confirm_promotion(piece).await);
            }
            ShellCommand::NewGame => controller.start_new_game().await,
            ShellCommand::Depth(depth) => {
                if let Err(err) = controller.configure_depth(depth) {
                    println!("{err}");
                }
            }
            ShellCommand::Side(side) => controller.configure_side(side),
            ShellCommand::Eval => {
                if let Err(err) = controller.request_evaluation().await {
                    println!("Evaluation unavailable: {err}");
                }
            }
            ShellCommand::Help => println!("{}", shell::help_text()),
            ShellCommand::Quit => break,
        }
    }

    Ok(())
}

fn render(controller: &GameController) {
    println!(
        "{}",
        shell::render_board(controller.fen(), controller.config().user_plays_as)
    );
    let turn = match controller.turn_owner() {
        TurnOwner::Human => "your move".to_string(),
        TurnOwner::Engine => "engine to move".to_string(),
    };
    println!("status: {}  |  {turn}", controller.status());
    println!("{}", shell::render_eval(controller.evaluation()));
    println!("moves: {}", shell::render_moves(controller.history()));

    if controller.status() != GameStatus::Ongoing {
        println!("Game over. Type `new` to play again.");
    }
}

fn report_gesture(result: chess_client::game::GameResult<GestureOutcome>) {
    match result {
        Ok(GestureOutcome::Applied) => {}
        Ok(GestureOutcome::PromotionRequired) => {}
        Ok(GestureOutcome::Illegal) => println!("Illegal move"),
        Ok(GestureOutcome::Rejected(reason)) => {
            let message = match reason {
                RejectReason::NotYourTurn => "It is not your turn",
                RejectReason::GameOver => "The game is over; type `new` to play again",
                RejectReason::EngineThinking => "The engine is still thinking",
                RejectReason::PromotionPending => "Pick a promotion piece first (q/r/b/n)",
                RejectReason::NoPromotionPending => "No promotion is waiting for a choice",
            };
            println!("{message}");
        }
        Err(err) => println!("Move failed: {err}; the board is unchanged, try again"),
    }
}
