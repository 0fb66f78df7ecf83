//! # Game Implementations Module
//!
//! Games the search engine can play. Each implements the `GameState` trait,
//! which provides candidate move generation, state transitions, and terminal
//! state detection with the winner.
//!
//! ## Supported Games
//! - **Connect Five (Gomoku)**: five in a row on a fixed 19x19 board

pub mod gomoku;
