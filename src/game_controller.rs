//! # Game Controller - the live game
//!
//! `GameController` owns the real board. Stones are placed here with
//! alternating colours, each placement is checked with the same
//! [`detect_win`] the search uses, and the move history is kept for display.
//! The engine only ever sees clones of this board.

use crate::games::gomoku::{detect_win, Board, GomokuMove, Stone, BOARD_SIZE};
use std::fmt;

/// Result of attempting to apply a move
#[derive(Debug, Clone, PartialEq)]
pub enum MoveResult {
    /// Move was successfully applied
    Success {
        /// The applied move
        move_made: GomokuMove,
        /// Colour that placed the stone
        player: Stone,
        /// Whether the game is now over
        game_over: bool,
        /// Winner if game is over (None for draw)
        winner: Option<Stone>,
    },
    /// Move was rejected as invalid
    Invalid {
        /// Reason the move was rejected
        reason: MoveValidationError,
    },
}

/// Errors that can occur during move validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveValidationError {
    /// Coordinates fall outside the board
    OutOfBounds,
    /// The cell already holds a stone
    Occupied,
    /// The game is already in a terminal state
    GameAlreadyOver,
}

impl fmt::Display for MoveValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveValidationError::OutOfBounds => write!(f, "Move is outside the board"),
            MoveValidationError::Occupied => write!(f, "Cell is already occupied"),
            MoveValidationError::GameAlreadyOver => write!(f, "Game is already over"),
        }
    }
}

/// A single entry in the move history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistoryEntry {
    /// Colour that made the move
    pub player: Stone,
    /// The move that was made
    pub move_made: GomokuMove,
    /// Move number (1-indexed)
    pub move_number: usize,
}

/// Current game status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is still in progress
    InProgress,
    /// Game ended with a winner
    Win(Stone),
    /// Board filled without a winner
    Draw,
}

impl GameStatus {
    /// Check if the game is over
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// The authoritative game state. Black moves first.
#[derive(Debug, Clone)]
pub struct GameController {
    board: Board,
    current_player: Stone,
    move_history: Vec<MoveHistoryEntry>,
    status: GameStatus,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Stone::Black,
            move_history: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Validate a move without applying it
    pub fn validate_move(&self, mv: GomokuMove) -> Result<(), MoveValidationError> {
        if self.status.is_game_over() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if mv.0 >= BOARD_SIZE || mv.1 >= BOARD_SIZE {
            return Err(MoveValidationError::OutOfBounds);
        }
        if !self.board.is_empty_at(mv.0, mv.1) {
            return Err(MoveValidationError::Occupied);
        }
        Ok(())
    }

    /// Places a stone for the player to move, then checks for a win or a
    /// full board.
    pub fn try_make_move(&mut self, mv: GomokuMove) -> MoveResult {
        if let Err(reason) = self.validate_move(mv) {
            return MoveResult::Invalid { reason };
        }

        let player = self.current_player;
        self.board.place(mv, player);
        self.current_player = player.opponent();
        self.move_history.push(MoveHistoryEntry {
            player,
            move_made: mv,
            move_number: self.move_history.len() + 1,
        });

        let winner = detect_win(&self.board, mv.0, mv.1);
        if let Some(w) = winner {
            self.status = GameStatus::Win(w);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        }

        MoveResult::Success {
            move_made: mv,
            player,
            game_over: self.status.is_game_over(),
            winner,
        }
    }

    pub fn get_board(&self) -> &Board {
        &self.board
    }

    pub fn get_current_player(&self) -> Stone {
        self.current_player
    }

    pub fn get_status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    pub fn get_winner(&self) -> Option<Stone> {
        match self.status {
            GameStatus::Win(w) => Some(w),
            _ => None,
        }
    }

    pub fn get_move_history(&self) -> &[MoveHistoryEntry] {
        &self.move_history
    }

    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    pub fn get_last_move(&self) -> Option<&MoveHistoryEntry> {
        self.move_history.last()
    }

    /// Clears the board and hands the first move back to Black.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = Stone::Black;
        self.move_history.clear();
        self.status = GameStatus::InProgress;
    }

    /// Move history as plain text, one move per line, followed by the result.
    pub fn format_history(&self) -> String {
        if self.move_history.is_empty() {
            return String::from("No moves made yet.");
        }

        let mut output = String::from("=== Connect Five Game History ===\n\n");
        for entry in &self.move_history {
            output.push_str(&format!(
                "{}. {} - {}\n",
                entry.move_number,
                player_name(entry.player),
                entry.move_made
            ));
        }

        match self.status {
            GameStatus::Win(winner) => {
                output.push_str(&format!("\nResult: {} wins!\n", player_name(winner)));
            }
            GameStatus::Draw => output.push_str("\nResult: Draw\n"),
            GameStatus::InProgress => {
                output.push_str(&format!(
                    "\n(Game in progress - {} to move)\n",
                    player_name(self.current_player)
                ));
            }
        }
        output
    }
}

fn player_name(stone: Stone) -> &'static str {
    match stone {
        Stone::Black => "Black",
        Stone::White => "White",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_move() {
        let mut controller = GameController::new();
        match controller.try_make_move(GomokuMove(9, 9)) {
            MoveResult::Success { player, game_over, .. } => {
                assert_eq!(player, Stone::Black);
                assert!(!game_over);
            }
            other => panic!("Expected successful move, got {:?}", other),
        }
        assert_eq!(controller.get_current_player(), Stone::White);
    }

    #[test]
    fn test_invalid_move_occupied() {
        let mut controller = GameController::new();
        controller.try_make_move(GomokuMove(9, 9));

        assert_eq!(
            controller.try_make_move(GomokuMove(9, 9)),
            MoveResult::Invalid { reason: MoveValidationError::Occupied }
        );
        // A rejected move does not pass the turn.
        assert_eq!(controller.get_current_player(), Stone::White);
    }

    #[test]
    fn test_out_of_bounds() {
        let controller = GameController::new();
        assert_eq!(
            controller.validate_move(GomokuMove(BOARD_SIZE, 0)),
            Err(MoveValidationError::OutOfBounds)
        );
    }

    #[test]
    fn test_five_in_a_row_ends_game() {
        let mut controller = GameController::new();
        for c in 0..4 {
            controller.try_make_move(GomokuMove(0, c));
            controller.try_make_move(GomokuMove(1, c));
        }
        match controller.try_make_move(GomokuMove(0, 4)) {
            MoveResult::Success { game_over, winner, .. } => {
                assert!(game_over);
                assert_eq!(winner, Some(Stone::Black));
            }
            other => panic!("Expected winning move, got {:?}", other),
        }
        assert_eq!(controller.get_status(), GameStatus::Win(Stone::Black));
        assert_eq!(
            controller.try_make_move(GomokuMove(5, 5)),
            MoveResult::Invalid { reason: MoveValidationError::GameAlreadyOver }
        );
    }

    #[test]
    fn test_move_history() {
        let mut controller = GameController::new();
        controller.try_make_move(GomokuMove(9, 9));
        controller.try_make_move(GomokuMove(9, 10));

        assert_eq!(controller.move_count(), 2);
        assert_eq!(controller.get_move_history()[0].player, Stone::Black);
        assert_eq!(controller.get_move_history()[1].player, Stone::White);
        assert_eq!(controller.get_last_move().map(|e| e.move_number), Some(2));
    }

    #[test]
    fn test_reset() {
        let mut controller = GameController::new();
        controller.try_make_move(GomokuMove(9, 9));
        controller.reset();

        assert_eq!(controller.move_count(), 0);
        assert!(controller.get_board().is_empty());
        assert_eq!(controller.get_current_player(), Stone::Black);
        assert_eq!(controller.get_status(), GameStatus::InProgress);
    }

    #[test]
    fn test_format_history() {
        let mut controller = GameController::new();
        assert_eq!(controller.format_history(), "No moves made yet.");

        controller.try_make_move(GomokuMove(7, 7));
        let history = controller.format_history();
        assert!(history.contains("Connect Five Game History"));
        assert!(history.contains("1. Black - (7, 7)"));
        assert!(history.contains("White to move"));
    }

    #[test]
    fn test_full_board_is_a_draw() {
        // Runs of two along every line: rows alternate in pairs of columns,
        // each row shifted by one from the row above.
        let stone_at = |r: usize, c: usize| {
            if (r + c / 2) % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            }
        };
        let mut black = Vec::new();
        let mut white = Vec::new();
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                match stone_at(r, c) {
                    Stone::Black => black.push(GomokuMove(r, c)),
                    Stone::White => white.push(GomokuMove(r, c)),
                }
            }
        }
        assert_eq!(black.len(), white.len() + 1);

        let mut controller = GameController::new();
        let mut white_moves = white.into_iter();
        for (i, mv) in black.into_iter().enumerate() {
            let result = controller.try_make_move(mv);
            assert!(matches!(result, MoveResult::Success { winner: None, .. }));
            if let Some(reply) = white_moves.next() {
                controller.try_make_move(reply);
            }
            assert_eq!(controller.is_game_over(), i == BOARD_SIZE * BOARD_SIZE / 2);
        }

        assert_eq!(controller.move_count(), BOARD_SIZE * BOARD_SIZE);
        assert_eq!(controller.get_status(), GameStatus::Draw);
        assert_eq!(controller.get_winner(), None);
        assert_eq!(
            controller.try_make_move(GomokuMove(9, 9)),
            MoveResult::Invalid { reason: MoveValidationError::GameAlreadyOver }
        );
        assert!(controller.format_history().ends_with("\nResult: Draw\n"));
    }
}
