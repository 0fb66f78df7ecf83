//! Error types shared by the rule engine, the search engine and the binaries.

use thiserror::Error;

/// Errors reported by the engine to its caller.
///
/// None of these are recovered internally: a malformed board or a full board
/// is a caller bug, not a search condition.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The board is not 19x19, not square, or contains an unknown cell value.
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// Every cell is occupied; the caller must check for game over first.
    #[error("No moves available: the board is full")]
    NoMovesAvailable,

    /// A move, colour or option string could not be parsed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, EngineError>;
