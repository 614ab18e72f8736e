//! # Tic-Tac-Toe Game Implementation
//!
//! Classic 3x3 game: players alternate marking empty cells and the first to
//! complete a row, column or diagonal wins. A full board without a line is a draw.
//!
//! ## Computer player
//! - **Hard**: full-depth minimax with alpha-beta pruning. Wins score
//!   `10 - ply` and losses `ply - 10`, so faster wins and slower losses are preferred.
//! - **Easy**: the same search truncated after three plies, where unfinished
//!   positions score zero.

use crate::search::{self, Evaluator};
use crate::{ComputerPlayer, Difficulty, GameState, MoveValidationError, Player, TurnOutcome};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SIZE: usize = 3;
const CELLS: usize = SIZE * SIZE;

/// Represents a move in Tic-Tac-Toe: the 0-based cell index, row-major.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TicTacToeMove(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeState {
    board: [Option<Player>; CELLS],
    current_player: Player,
    last_move: Option<usize>,
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..SIZE {
            for c in 0..SIZE {
                let idx = r * SIZE + c;
                match self.board[idx] {
                    Some(Player::One) => write!(f, " X ")?,
                    Some(Player::Two) => write!(f, " O ")?,
                    None => write!(f, " {} ", idx)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for TicTacToeState {
    type Move = TicTacToeMove;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..CELLS)
            .filter(|&i| self.board[i].is_none())
            .map(TicTacToeMove)
            .collect()
    }

    fn make_move(&mut self, mv: &Self::Move) -> TurnOutcome {
        self.board[mv.0] = Some(self.current_player);
        self.last_move = Some(mv.0);
        self.current_player = self.current_player.opponent();
        TurnOutcome::Alternate
    }

    fn is_terminal(&self) -> bool {
        self.get_winner().is_some() || self.board.iter().all(|c| c.is_some())
    }

    fn get_winner(&self) -> Option<Player> {
        [Player::One, Player::Two]
            .into_iter()
            .find(|&p| board_shared::check_line_win(&self.board, SIZE, SIZE, Some(p), SIZE))
    }

    fn get_current_player(&self) -> Player {
        self.current_player
    }
}

impl TicTacToeState {
    /// Creates an empty board with Player One (X) to move.
    pub fn new() -> Self {
        Self {
            board: [None; CELLS],
            current_player: Player::One,
            last_move: None,
        }
    }

    pub fn cells(&self) -> &[Option<Player>] {
        &self.board
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Empty cells are legal for the side to move and for nobody else.
    pub fn legal_moves_for(&self, player: Player) -> Vec<TicTacToeMove> {
        if player == self.current_player {
            self.get_possible_moves()
        } else {
            Vec::new()
        }
    }

    /// Validated move application.
    pub fn apply_move(&mut self, player: Player, mv: TicTacToeMove) -> Result<TurnOutcome, MoveValidationError> {
        if self.is_terminal() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if player != self.current_player {
            return Err(MoveValidationError::NotYourTurn);
        }
        if mv.0 >= CELLS {
            return Err(MoveValidationError::illegal(format!("cell {} is off the board", mv.0)));
        }
        if self.board[mv.0].is_some() {
            return Err(MoveValidationError::illegal(format!("cell {} is already taken", mv.0)));
        }
        Ok(self.make_move(&mv))
    }
}

impl FromStr for TicTacToeMove {
    type Err = String;

    /// Parses a cell index `0..=8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let idx = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(TicTacToeMove(idx))
    }
}

/// Win/loss scoring adjusted by depth.
pub struct TicTacToeEvaluator;

impl Evaluator<TicTacToeState> for TicTacToeEvaluator {
    fn evaluate(&self, state: &TicTacToeState, perspective: Player, ply: usize) -> i32 {
        match state.get_winner() {
            Some(p) if p == perspective => 10 - ply as i32,
            Some(_) => ply as i32 - 10,
            None => 0,
        }
    }
}

/// Tic-Tac-Toe computer player; depths count the computer's own move as the first ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeAi {
    pub easy_depth: usize,
    pub hard_depth: usize,
}

impl Default for TicTacToeAi {
    fn default() -> Self {
        Self { easy_depth: 3, hard_depth: CELLS }
    }
}

impl ComputerPlayer<TicTacToeState> for TicTacToeAi {
    fn choose_move<R: Rng + ?Sized>(&self, state: &TicTacToeState, difficulty: Difficulty, rng: &mut R) -> Option<TicTacToeMove> {
        let depth = match difficulty {
            Difficulty::Easy => self.easy_depth,
            Difficulty::Hard => self.hard_depth,
        };
        search::choose_minimax_move(state, depth, &TicTacToeEvaluator, rng)
    }
}
