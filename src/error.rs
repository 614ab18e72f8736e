//! Errors surfaced when a requested move or input is refused.
//!
//! Rejections never change game state; the caller reports the reason and
//! keeps the loop running.

use std::fmt;

/// Errors that can occur during move validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveValidationError {
    /// The move breaks a placement rule (occupied cell, full column, flanks nothing, ...)
    IllegalMove(String),
    /// Malformed or out-of-range input (Nim take amount, Sudoku digit, parse failures)
    InvalidInput(String),
    /// The move was submitted for the side that is not on turn
    NotYourTurn,
    /// Move type doesn't match the current game
    MismatchedGameType,
    /// The game is already in a terminal state
    GameAlreadyOver,
}

impl MoveValidationError {
    pub fn illegal(reason: impl Into<String>) -> Self {
        MoveValidationError::IllegalMove(reason.into())
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        MoveValidationError::InvalidInput(reason.into())
    }
}

impl fmt::Display for MoveValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveValidationError::IllegalMove(reason) => write!(f, "Illegal move: {}", reason),
            MoveValidationError::InvalidInput(reason) => write!(f, "Invalid input: {}", reason),
            MoveValidationError::NotYourTurn => write!(f, "It is not your turn"),
            MoveValidationError::MismatchedGameType => write!(f, "Move type doesn't match game"),
            MoveValidationError::GameAlreadyOver => write!(f, "Game is already over"),
        }
    }
}

impl std::error::Error for MoveValidationError {}
