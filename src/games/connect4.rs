//! # Connect 4 Game Implementation
//!
//! This module implements the classic Connect 4 board game.
//! Players take turns dropping pieces into columns, trying to get 4 pieces
//! in a row (horizontally, vertically, or diagonally).
//!
//! ## Rules
//! - Players alternate dropping pieces into columns
//! - Pieces fall to the lowest available spot in the column due to gravity
//! - First player to get 4 pieces in a row wins
//! - Game is a draw if the board fills up with no winner
//!
//! ## Computer player
//! - **Easy**: uniformly random column
//! - **Hard**: greedy one-ply heuristic. An immediate win beats blocking the
//!   opponent's immediate win, which beats the positional potential score.

use crate::search;
use crate::{ComputerPlayer, Difficulty, GameState, MoveValidationError, Player, TurnOutcome};
use board_shared::LINE_AXES;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a move in Connect 4
///
/// Contains the column number where a player wants to drop their piece.
/// Column numbers are 0-based indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Connect4Move(pub usize);

/// Represents the complete state of a Connect 4 game
///
/// Contains the board state, current player, dimensions, and the last drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connect4State {
    /// The game board as a flat vector (row-major, row 0 is the top)
    board: Vec<Option<Player>>,
    current_player: Player,
    /// Board width (number of columns)
    width: usize,
    /// Board height (number of rows)
    height: usize,
    /// Number of pieces needed in a row to win
    line_size: usize,
    /// Last move made, if any (row, column)
    last_move: Option<(usize, usize)>,
}

impl Default for Connect4State {
    fn default() -> Self {
        Self::new(7, 6, 4)
    }
}

impl fmt::Display for Connect4State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height {
            for c in 0..self.width {
                let symbol = match self.board[r * self.width + c] {
                    Some(Player::One) => "X",
                    Some(Player::Two) => "O",
                    None => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        for c in 0..self.width {
            write!(f, "{} ", c)?;
        }
        writeln!(f)
    }
}

impl GameState for Connect4State {
    type Move = Connect4Move; // Column to drop a piece

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        if self.get_winner().is_some() {
            return Vec::new();
        }
        (0..self.width)
            .filter(|&c| self.board[c].is_none())
            .map(Connect4Move)
            .collect()
    }

    fn make_move(&mut self, mv: &Self::Move) -> TurnOutcome {
        if let Some(r) = self.landing_row(mv.0) {
            self.board[r * self.width + mv.0] = Some(self.current_player);
            self.last_move = Some((r, mv.0));
            self.current_player = self.current_player.opponent();
        }
        TurnOutcome::Alternate
    }

    fn is_terminal(&self) -> bool {
        self.get_winner().is_some() || (0..self.width).all(|c| self.board[c].is_some())
    }

    fn get_winner(&self) -> Option<Player> {
        let (r, c) = self.last_move?;
        let player = self.board[r * self.width + c]?;
        if board_shared::line_through(&self.board, self.width, self.height, r, c, self.line_size) {
            Some(player)
        } else {
            None
        }
    }

    fn get_current_player(&self) -> Player {
        self.current_player
    }
}

impl Connect4State {
    /// Creates a new Connect 4 game with the specified configuration
    pub fn new(width: usize, height: usize, line_size: usize) -> Self {
        Self {
            board: vec![None; width * height],
            current_player: Player::One,
            width,
            height,
            line_size,
            last_move: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Gets the number of pieces needed in a row to win
    pub fn get_line_size(&self) -> usize {
        self.line_size
    }

    pub fn get_last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        self.board[row * self.width + col]
    }

    /// Checks if a move is legal in the current game state
    ///
    /// A move is legal if the column is within bounds and the top row
    /// of that column is empty (pieces can be dropped).
    pub fn is_legal(&self, mv: &Connect4Move) -> bool {
        !self.is_terminal() && mv.0 < self.width && self.board[mv.0].is_none()
    }

    /// Columns the given side could drop into; empty unless it is that side's turn.
    pub fn legal_moves_for(&self, player: Player) -> Vec<Connect4Move> {
        if player == self.current_player {
            self.get_possible_moves()
        } else {
            Vec::new()
        }
    }

    /// Validated move application.
    pub fn apply_move(&mut self, player: Player, mv: Connect4Move) -> Result<TurnOutcome, MoveValidationError> {
        if self.is_terminal() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if player != self.current_player {
            return Err(MoveValidationError::NotYourTurn);
        }
        if mv.0 >= self.width {
            return Err(MoveValidationError::illegal(format!("column {} does not exist", mv.0)));
        }
        if self.board[mv.0].is_some() {
            return Err(MoveValidationError::illegal(format!("column {} is full", mv.0)));
        }
        Ok(self.make_move(&mv))
    }

    /// Lowest empty row of a column.
    fn landing_row(&self, col: usize) -> Option<usize> {
        (0..self.height).rev().find(|&r| self.board[r * self.width + col].is_none())
    }

    /// Would dropping a `player` disc into `col` complete a line?
    ///
    /// Fills the landing cell on a scratch copy, so the live board is untouched.
    fn wins_with(&self, col: usize, player: Player) -> bool {
        let Some(r) = self.landing_row(col) else {
            return false;
        };
        let mut scratch = self.board.clone();
        scratch[r * self.width + col] = Some(player);
        board_shared::line_through(&scratch, self.width, self.height, r, col, self.line_size)
    }

    /// Positional potential of dropping `player`'s disc at `(row, col)`.
    fn potential(&self, row: usize, col: usize, player: Player, weights: &Connect4Weights) -> i32 {
        let reach = self.line_size.saturating_sub(1) as i32;
        let mut score = 0;
        for &(dr, dc) in LINE_AXES.iter() {
            let (mut own, mut theirs, mut empty) = (0, 0, 0);
            for i in -reach..=reach {
                let r = row as i32 + dr * i;
                let c = col as i32 + dc * i;
                if r < 0 || c < 0 || r >= self.height as i32 || c >= self.width as i32 {
                    continue;
                }
                match self.board[r as usize * self.width + c as usize] {
                    Some(p) if p == player => own += 1,
                    Some(_) => theirs += 1,
                    None => empty += 1,
                }
            }
            if own == 3 && empty >= 1 {
                score += weights.own_three;
            }
            if own == 2 && empty >= 2 {
                score += weights.own_two;
            }
            if theirs == 3 && empty >= 1 {
                score += weights.opponent_three;
            }
            if theirs == 2 && empty >= 2 {
                score += weights.opponent_two;
            }
        }
        let center = (self.width / 2) as i32;
        score + (center - (col as i32 - center).abs()) * weights.center
    }
}

impl FromStr for Connect4Move {
    type Err = String;

    /// Creates a Connect4Move from a string representation
    ///
    /// Expected format is just the column number as a string.
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use arena::games::connect4::Connect4Move;
    /// let mv = Connect4Move::from_str("3").unwrap();
    /// assert_eq!(mv.0, 3);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(Connect4Move(c))
    }
}

/// Tuned scoring weights of the hard heuristic. No derivation exists for these
/// values; they are kept as configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connect4Weights {
    pub own_three: i32,
    pub own_two: i32,
    pub opponent_three: i32,
    pub opponent_two: i32,
    /// Bonus per column of closeness to the centre.
    pub center: i32,
}

impl Default for Connect4Weights {
    fn default() -> Self {
        Self {
            own_three: 100,
            own_two: 50,
            opponent_three: 80,
            opponent_two: 40,
            center: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connect4Ai {
    pub weights: Connect4Weights,
}

impl Connect4Ai {
    fn greedy<R: Rng + ?Sized>(&self, state: &Connect4State, rng: &mut R) -> Option<Connect4Move> {
        let me = state.get_current_player();
        let moves = state.get_possible_moves();

        let winning: Vec<_> = moves.iter().copied().filter(|m| state.wins_with(m.0, me)).collect();
        if let Some(mv) = winning.choose(rng) {
            return Some(*mv);
        }

        let blocking: Vec<_> = moves
            .iter()
            .copied()
            .filter(|m| state.wins_with(m.0, me.opponent()))
            .collect();
        if let Some(mv) = blocking.choose(rng) {
            return Some(*mv);
        }

        let scored = moves
            .into_iter()
            .filter_map(|m| {
                let row = state.landing_row(m.0)?;
                Some((m, state.potential(row, m.0, me, &self.weights)))
            })
            .collect();
        search::pick_best(scored, rng)
    }
}

impl ComputerPlayer<Connect4State> for Connect4Ai {
    fn choose_move<R: Rng + ?Sized>(&self, state: &Connect4State, difficulty: Difficulty, rng: &mut R) -> Option<Connect4Move> {
        match difficulty {
            Difficulty::Easy => search::random_move(state, rng),
            Difficulty::Hard => self.greedy(state, rng),
        }
    }
}
