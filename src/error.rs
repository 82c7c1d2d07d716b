use std::fmt;

use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The move is not in the current legal set, or the game is over.
    IllegalMove(Position),
    /// Out-of-range coordinate, bad board size or malformed input.
    InvalidArgument(String),
    /// A move selector produced no move, or an illegal one, on the AI's turn.
    SelectorFailed,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::IllegalMove(pos) => write!(f, "illegal move at {pos}"),
            EngineError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            EngineError::SelectorFailed => write!(f, "move selector failed to choose a legal move"),
        }
    }
}

impl std::error::Error for EngineError {}
