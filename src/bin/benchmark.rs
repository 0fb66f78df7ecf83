use clap::Parser;
use mcts::games::gomoku::{Board, GomokuMove, Stone};
use mcts::logging::setup_logging;
use mcts::player::decide_move_with;
use mcts::{SearchConfig, SearchStatistics, DEFAULT_EXPLORATION};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::error::Error;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of decisions to time (default: 10)
    #[arg(long, default_value_t = 10)]
    decisions: u32,

    /// Seed of the first decision; each following decision uses the next seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Exploration constant C of the UCB formula
    #[arg(short = 'e', long, default_value_t = DEFAULT_EXPLORATION)]
    exploration_parameter: f64,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// A mid-game position with a few stones of each colour around the centre.
fn benchmark_board() -> Board {
    let stones = [
        (9, 9, Stone::Black),
        (9, 10, Stone::White),
        (10, 10, Stone::Black),
        (8, 8, Stone::White),
        (10, 9, Stone::Black),
        (11, 9, Stone::White),
        (8, 10, Stone::Black),
        (7, 11, Stone::White),
    ];
    let mut board = Board::new();
    for (r, c, s) in stones {
        board.place(GomokuMove(r, c), s);
    }
    board
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = setup_logging(&args.log_level)?;

    println!("Connect Five MCTS - Benchmark Tool");
    println!("==================================");
    println!("Decisions: {}", args.decisions);
    println!("Seed: {}", args.seed);
    println!("Exploration: {:.3}", args.exploration_parameter);
    println!("----------------------------------");

    #[cfg(debug_assertions)]
    println!("WARNING: Running in debug mode. Performance will be significantly lower.\nUse --release for accurate benchmarks.\n");

    let board = benchmark_board();
    let config = SearchConfig::default().with_exploration_constant(args.exploration_parameter);

    let mut total = Duration::ZERO;
    for i in 0..args.decisions {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(args.seed.wrapping_add(i as u64));
        let start = Instant::now();
        let (mv, stats) = decide_move_with(&board, Stone::Black, &config, &mut rng)?;
        let elapsed = start.elapsed();
        total += elapsed;

        println!("\nDecision {}: {}", i + 1, mv);
        if let Some(stats) = stats {
            print_stats(&stats, elapsed);
        }
    }

    if args.decisions > 0 {
        println!("\nAverage decision time: {:.2?}", total / args.decisions);
    }
    Ok(())
}

fn print_stats(stats: &SearchStatistics, duration: Duration) {
    println!("  Time: {:.2?}", duration);
    println!("  Rounds: {}", stats.rounds);
    println!("  Nodes: {}", stats.node_count);
    println!("  Max depth: {}", stats.max_depth);
    println!("  Root win rate: {:.3}", stats.root_win_rate());
    println!(
        "  Best child: {}/{} wins",
        stats.best_child_wins, stats.best_child_visits
    );
    let secs = duration.as_secs_f64();
    if secs > 0.0 {
        println!("  Rounds/sec: {:.0}", stats.rounds as f64 / secs);
    }
}
