//! # Connect-Five MCTS Engine
//!
//! A Monte Carlo Tree Search engine that picks a move for five-in-a-row on a
//! fixed 19x19 board. Each decision builds a fresh search tree rooted at the
//! caller's board, runs a fixed number of rounds of selection, expansion,
//! random rollout and backpropagation, and returns the move of the root's best
//! child.
//!
//! ## Usage
//! ```
//! use mcts::games::gomoku::{Board, GomokuMove, Stone};
//! use mcts::decide_move;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
//! let board = Board::new();
//! assert_eq!(decide_move(&board, Stone::White, &mut rng).unwrap(), GomokuMove(9, 9));
//! ```

pub mod config;
pub mod error;
pub mod game_controller;
pub mod games;
pub mod logging;
pub mod player;
pub mod tree;

pub use config::{SearchConfig, DEFAULT_EXPLORATION, ROUNDS_PER_DECISION};
pub use error::{EngineError, Result};
pub use player::{decide_move, MctsPlayer};

use log::debug;
use rand::Rng;
use std::fmt::Debug;
use std::marker::PhantomData;
use tree::SearchTree;

/// Final result of a finished game or rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<P> {
    Win(P),
    /// Nobody won; distinct from either player.
    Draw,
}

/// The state of the game. Must be cloneable so every search node can own a
/// snapshot.
pub trait GameState: Clone {
    /// The type of a move in the game.
    type Move: Copy + Eq + Debug;
    /// The type identifying a player.
    type Player: Copy + Eq + Debug;

    /// Returns the candidate moves for the player to move.
    fn get_possible_moves(&self) -> Vec<Self::Move>;
    /// Applies a move for the player to move and passes the turn.
    fn make_move(&mut self, mv: &Self::Move);
    /// Returns the outcome if the last move ended the game, `None` otherwise.
    fn get_outcome(&self) -> Option<Outcome<Self::Player>>;
    /// Returns the player whose turn it is to move.
    fn get_current_player(&self) -> Self::Player;
}

/// Summary of one search, for logging and benchmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStatistics {
    pub rounds: u32,
    pub node_count: usize,
    pub max_depth: usize,
    pub root_visits: u32,
    pub root_wins: u32,
    pub best_child_visits: u32,
    pub best_child_wins: u32,
}

impl SearchStatistics {
    /// Fraction of rollouts through the root credited to the searching side.
    pub fn root_win_rate(&self) -> f64 {
        if self.root_visits == 0 {
            0.0
        } else {
            self.root_wins as f64 / self.root_visits as f64
        }
    }
}

/// The main MCTS engine.
///
/// Holds only configuration; every call to [`MCTS::search`] builds and drops
/// its own tree.
pub struct MCTS<S: GameState> {
    /// The exploration constant for the UCB formula.
    exploration_parameter: f64,
    /// Rounds per search.
    rounds: u32,
    _state: PhantomData<fn() -> S>,
}

impl<S: GameState> MCTS<S> {
    /// Creates a new MCTS engine running [`ROUNDS_PER_DECISION`] rounds.
    pub fn new(exploration_parameter: f64) -> Self {
        MCTS {
            exploration_parameter,
            rounds: ROUNDS_PER_DECISION,
            _state: PhantomData,
        }
    }

    /// Runs the full search and returns the tree, for inspection.
    pub fn build_tree<R: Rng>(&self, state: &S, rng: &mut R) -> SearchTree<S> {
        let mut tree = SearchTree::new(state.clone(), self.exploration_parameter);
        for _ in 0..self.rounds {
            tree.run_round(rng);
        }
        tree
    }

    /// Searches from `state` and returns the chosen move with statistics.
    ///
    /// # Errors
    /// `EngineError::NoMovesAvailable` if the side to move has no candidate
    /// moves at the root.
    pub fn search<R: Rng>(&self, state: &S, rng: &mut R) -> Result<(S::Move, SearchStatistics)> {
        if state.get_possible_moves().is_empty() {
            return Err(EngineError::NoMovesAvailable);
        }

        let tree = self.build_tree(state, rng);
        let (best_move, best_id) = tree.best_move(rng).ok_or(EngineError::NoMovesAvailable)?;

        let root = tree.get(tree.root());
        let best = tree.get(best_id);
        let stats = SearchStatistics {
            rounds: tree.rounds(),
            node_count: tree.len(),
            max_depth: tree.max_depth(),
            root_visits: root.visits(),
            root_wins: root.wins(),
            best_child_visits: best.visits(),
            best_child_wins: best.wins(),
        };

        debug!(
            "search finished: move={:?} nodes={} depth={} root={}/{} best={}/{}",
            best_move,
            stats.node_count,
            stats.max_depth,
            stats.root_wins,
            stats.root_visits,
            stats.best_child_wins,
            stats.best_child_visits
        );

        Ok((best_move, stats))
    }
}
