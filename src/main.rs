//! # Connect-Five Player
//!
//! Command line front end for the MCTS engine.
//!
//! - `play self-play` runs a full game between two seeded engine players on the
//!   live game controller, printing every move and the final board.
//! - `play decide <board-file> --color b|w` prints the engine's move for a
//!   board stored in the text format (19 rows of `.`, `b`, `w`).
//!
//! Pass `--seed` to reproduce a run; the seed actually used is logged.

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{info, warn};
use mcts::game_controller::{GameController, GameStatus, MoveResult};
use mcts::games::gomoku::{Board, CandidateRule, GomokuMove, Stone, BOARD_SIZE};
use mcts::logging::setup_logging;
use mcts::{EngineError, MctsPlayer, SearchConfig, DEFAULT_EXPLORATION};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Seed for the random source (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Exploration constant C of the UCB formula
    #[arg(short = 'e', long, global = true, default_value_t = DEFAULT_EXPLORATION)]
    exploration_parameter: f64,

    /// Candidate moves: own-stones, any-stone or all-empty
    #[arg(long, global = true, default_value = "own-stones", value_parser = parse_candidates)]
    candidates: CandidateRule,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Command {
    /// Two engine players play one game against each other
    SelfPlay {
        /// Stop after this many moves even if the game is not over
        #[arg(long, default_value_t = BOARD_SIZE * BOARD_SIZE)]
        max_moves: usize,
    },
    /// Print the engine's move for a board file
    Decide {
        /// Path to a board in the text format
        board: PathBuf,

        /// Colour to move: b or w
        #[arg(long, value_parser = parse_color)]
        color: Stone,
    },
}

fn parse_candidates(s: &str) -> Result<CandidateRule, String> {
    s.parse().map_err(|e: EngineError| e.to_string())
}

fn parse_color(s: &str) -> Result<Stone, String> {
    s.parse().map_err(|e: EngineError| e.to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = setup_logging(&args.log_level)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("using seed {}", seed);

    let config = SearchConfig::default()
        .with_exploration_constant(args.exploration_parameter)
        .with_candidate_rule(args.candidates);

    match args.command {
        Command::SelfPlay { max_moves } => self_play(config, seed, max_moves),
        Command::Decide { board, color } => decide(config, seed, board, color),
    }
}

fn self_play(config: SearchConfig, seed: u64, max_moves: usize) -> Result<(), Box<dyn Error>> {
    let mut controller = GameController::new();
    let mut black = MctsPlayer::seeded(config, seed);
    let mut white = MctsPlayer::seeded(config, seed.wrapping_add(1));

    while !controller.is_game_over() && controller.move_count() < max_moves {
        let color = controller.get_current_player();
        let player = match color {
            Stone::Black => &mut black,
            Stone::White => &mut white,
        };
        let mv = player.decide_move(controller.get_board(), color)?;
        println!("Auto {} move: {}", color, mv);

        if let MoveResult::Invalid { reason } = controller.try_make_move(mv) {
            warn!("engine proposed {} for {}: {}", mv, color, reason);
            return Err(format!("engine proposed an invalid move {}: {}", mv, reason).into());
        }
    }

    print_board(controller.get_board(), controller.get_last_move().map(|e| e.move_made));
    println!("{}", controller.format_history());
    match (controller.get_status(), controller.get_winner()) {
        (GameStatus::InProgress, _) => {
            info!("stopped after {} moves without a result", controller.move_count())
        }
        (_, Some(winner)) => println!("{} wins after {} moves", winner, controller.move_count()),
        (_, None) => println!("Draw after {} moves", controller.move_count()),
    }
    Ok(())
}

fn decide(config: SearchConfig, seed: u64, path: PathBuf, color: Stone) -> Result<(), Box<dyn Error>> {
    let board = Board::load(&path)?;
    let mut player = MctsPlayer::seeded(config, seed);
    let mv = player.decide_move(&board, color)?;

    print_board(&board, Some(mv));
    println!("{} {}", mv.0, mv.1);
    Ok(())
}

/// Prints the board with row/column indices, highlighting `highlight`.
fn print_board(board: &Board, highlight: Option<GomokuMove>) {
    let header: String = (0..BOARD_SIZE).map(|c| format!("{:>2}", c % 10)).collect();
    println!("   {}", header.dimmed());
    for r in 0..BOARD_SIZE {
        print!("{:>2} ", r.to_string().dimmed());
        for c in 0..BOARD_SIZE {
            let cell = match board.get(r, c) {
                Some(Stone::Black) => "X".red().bold(),
                Some(Stone::White) => "O".cyan().bold(),
                None => ".".dimmed(),
            };
            let cell = if highlight == Some(GomokuMove(r, c)) {
                cell.on_yellow()
            } else {
                cell
            };
            print!(" {}", cell);
        }
        println!();
    }
}
