//! The engine's public entry point: pick a move for a colour on a board.

use crate::config::SearchConfig;
use crate::error::{EngineError, Result};
use crate::games::gomoku::{Board, GomokuMove, GomokuState, Stone, CENTER};
use crate::{SearchStatistics, MCTS};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Picks a move for `color` on `board` with the default configuration.
///
/// The board is not modified. An empty board yields the centre cell without
/// searching.
///
/// # Errors
/// `EngineError::NoMovesAvailable` if every cell is occupied.
pub fn decide_move<R: Rng>(board: &Board, color: Stone, rng: &mut R) -> Result<GomokuMove> {
    decide_move_with(board, color, &SearchConfig::default(), rng).map(|(mv, _)| mv)
}

/// Like [`decide_move`] with an explicit configuration. Statistics are `None`
/// when the move was chosen without a search.
pub fn decide_move_with<R: Rng>(
    board: &Board,
    color: Stone,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<(GomokuMove, Option<SearchStatistics>)> {
    if board.is_full() {
        return Err(EngineError::NoMovesAvailable);
    }
    if board.is_empty() {
        debug!("empty board, opening at {}", CENTER);
        return Ok((CENTER, None));
    }

    let state = GomokuState::new(board.clone(), color, config.candidate_rule);
    let engine = MCTS::new(config.exploration_constant);
    let (mv, stats) = engine.search(&state, rng)?;
    Ok((mv, Some(stats)))
}

/// An engine player owning its configuration and random source.
///
/// Two players built with the same seed make the same decisions.
pub struct MctsPlayer<R: Rng = Xoshiro256PlusPlus> {
    config: SearchConfig,
    rng: R,
    /// Statistics of the most recent search.
    last_stats: Option<SearchStatistics>,
}

impl MctsPlayer<Xoshiro256PlusPlus> {
    /// Creates a player with a seeded `Xoshiro256PlusPlus` source.
    pub fn seeded(config: SearchConfig, seed: u64) -> Self {
        Self::with_rng(config, Xoshiro256PlusPlus::seed_from_u64(seed))
    }
}

impl<R: Rng> MctsPlayer<R> {
    pub fn with_rng(config: SearchConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            last_stats: None,
        }
    }

    pub fn last_stats(&self) -> Option<&SearchStatistics> {
        self.last_stats.as_ref()
    }

    /// Picks a move for `color`. See [`decide_move`].
    pub fn decide_move(&mut self, board: &Board, color: Stone) -> Result<GomokuMove> {
        let (mv, stats) = decide_move_with(board, color, &self.config, &mut self.rng)?;
        if let Some(stats) = &stats {
            info!(
                "{} plays {} after {} rounds ({} nodes, root win rate {:.2})",
                color,
                mv,
                stats.rounds,
                stats.node_count,
                stats.root_win_rate()
            );
        }
        self.last_stats = stats;
        Ok(mv)
    }
}
