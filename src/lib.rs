//! # Mini Games Arena
//!
//! Rules engines and computer opponents for a family of small classic games.
//! Every two-player game implements [`GameState`], which is all the search code
//! in [`search`] and the orchestration loop in [`game_controller`] need to know.
//!
//! ## Layout
//! - [`games`]: one module per game (state, moves, rules, computer player)
//! - [`search`]: alpha-beta minimax and the random / greedy move pickers
//! - [`game_wrapper`]: a single enum over the two-player games
//! - [`game_controller`]: the authoritative game loop and its notifications
//! - [`config`]: serde-backed configuration and AI tunables

pub mod config;
pub mod error;
pub mod game_controller;
pub mod game_wrapper;
pub mod games;
pub mod search;

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use error::MoveValidationError;

/// The random source injected into every computer player.
pub type GameRng = rand_xoshiro::Xoshiro256PlusPlus;

/// Builds a [`GameRng`], deterministic when a seed is given.
pub fn seeded_rng(seed: Option<u64>) -> GameRng {
    match seed {
        Some(seed) => GameRng::seed_from_u64(seed),
        None => GameRng::from_rng(&mut rand::rng()),
    }
}

/// One of the two symmetric sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Zero-based index, handy for per-player arrays.
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// Current game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is still in progress
    InProgress,
    /// Game ended with a winner
    Win(Player),
    /// Game ended in a draw
    Draw,
}

impl GameStatus {
    /// Check if the game is over
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// What a move did to the turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The opponent moves next.
    Alternate,
    /// The mover goes again (Mancala store landing, Dots-and-Boxes box closure).
    ExtraTurn,
    /// The opponent had no legal move, so the mover goes again (Othello).
    OpponentPassed,
}

impl TurnOutcome {
    pub fn same_player_again(self) -> bool {
        !matches!(self, TurnOutcome::Alternate)
    }
}

/// Strength of the computer player. Never changes the rules, only move quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}', expected easy or hard", other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// The state of a finite, deterministic two-player game.
///
/// Must be cloneable: searches explore hypothetical moves on private copies and
/// never touch the state they were handed. `Send` and `Sync` let independent
/// games run on worker threads.
pub trait GameState: Clone + Send + Sync {
    /// The type of a move in the game.
    type Move: Clone + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync;

    /// Returns every legal move for the side to move. Empty exactly when that
    /// side has no action.
    fn get_possible_moves(&self) -> Vec<Self::Move>;
    /// Applies a move that is known to be legal and reports how the turn changed.
    fn make_move(&mut self, mv: &Self::Move) -> TurnOutcome;
    /// Returns true if the game is over.
    fn is_terminal(&self) -> bool;
    /// Returns the winner of a finished game, `None` for a draw or an unfinished game.
    fn get_winner(&self) -> Option<Player>;
    /// Returns the player whose turn it is to move.
    fn get_current_player(&self) -> Player;

    fn is_legal(&self, mv: &Self::Move) -> bool {
        !self.is_terminal() && self.get_possible_moves().contains(mv)
    }

    fn status(&self) -> GameStatus {
        if !self.is_terminal() {
            return GameStatus::InProgress;
        }
        match self.get_winner() {
            Some(p) => GameStatus::Win(p),
            None => GameStatus::Draw,
        }
    }
}

/// A move-selection policy for the computer side of a game.
///
/// Returns `None` when the side to move has nothing to play; callers treat
/// that as a pass or as the end of the game.
pub trait ComputerPlayer<S: GameState> {
    fn choose_move<R: Rng + ?Sized>(&self, state: &S, difficulty: Difficulty, rng: &mut R) -> Option<S::Move>;
}
