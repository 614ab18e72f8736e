//! # Othello (Reversi) Game Implementation
//!
//! This module implements the classic Othello (also known as Reversi) board game.
//! Players take turns placing pieces on an 8x8 board, with the goal of having
//! the most pieces of their color when the board is full or no more moves are possible.
//!
//! ## Rules
//! - Players must place pieces that "sandwich" opponent pieces between the new piece
//!   and an existing piece of the same color
//! - All sandwiched pieces are flipped to the current player's color
//! - If a player has no legal moves, their turn is skipped
//! - Game ends when neither player can make a move
//! - Winner is determined by who has more pieces on the board
//!
//! ## Computer player
//! - **Easy**: uniformly random legal move
//! - **Hard**: alpha-beta minimax (4 plies by default) scored by a positional
//!   weight table plus a mobility bonus

use crate::search::{self, Evaluator};
use crate::{ComputerPlayer, Difficulty, GameState, MoveValidationError, Player, TurnOutcome};
use board_shared::COMPASS;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side length of the board.
pub const SIZE: usize = 8;

/// Corners are worth the most; cells touching a corner are liabilities.
const POSITION_WEIGHTS: [[i32; SIZE]; SIZE] = [
    [100, -10, 11, 6, 6, 11, -10, 100],
    [-10, -20, 1, 2, 2, 1, -20, -10],
    [11, 1, 5, 4, 4, 5, 1, 11],
    [6, 2, 4, 2, 2, 4, 2, 6],
    [6, 2, 4, 2, 2, 4, 2, 6],
    [11, 1, 5, 4, 4, 5, 1, 11],
    [-10, -20, 1, 2, 2, 1, -20, -10],
    [100, -10, 11, 6, 6, 11, -10, 100],
];

/// Represents a move in Othello
///
/// Contains the row and column coordinates where a player wants to place their piece.
/// Both coordinates are 0-based indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct OthelloMove(pub usize, pub usize);

/// Represents the complete state of an Othello game
///
/// Player One plays black and moves first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OthelloState {
    /// Row-major cells
    board: Vec<Option<Player>>,
    current_player: Player,
    last_move: Option<(usize, usize)>,
}

/// Result of a validated Othello move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OthelloOutcome {
    pub flipped: usize,
    pub turn: TurnOutcome,
}

impl Default for OthelloState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OthelloState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..SIZE {
            write!(f, "{} ", c)?;
        }
        writeln!(f)?;
        let hints = self.get_possible_moves();
        for r in 0..SIZE {
            write!(f, "{} ", r)?;
            for c in 0..SIZE {
                let symbol = match self.cell(r, c) {
                    Some(Player::One) => "B",
                    Some(Player::Two) => "W",
                    None if hints.contains(&OthelloMove(r, c)) => "*",
                    None => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        let (black, white) = self.disc_counts();
        writeln!(f, "Black: {}  White: {}", black, white)
    }
}

impl GameState for OthelloState {
    type Move = OthelloMove;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        self.legal_moves_for(self.current_player)
    }

    fn make_move(&mut self, mv: &Self::Move) -> TurnOutcome {
        self.place(mv, self.current_player);
        let mover = self.current_player;
        self.current_player = mover.opponent();

        // If the new player has no moves, skip their turn
        if self.legal_moves_for(self.current_player).is_empty() && !self.legal_moves_for(mover).is_empty() {
            self.current_player = mover;
            return TurnOutcome::OpponentPassed;
        }
        TurnOutcome::Alternate
    }

    fn is_terminal(&self) -> bool {
        self.legal_moves_for(Player::One).is_empty() && self.legal_moves_for(Player::Two).is_empty()
    }

    fn get_winner(&self) -> Option<Player> {
        if !self.is_terminal() {
            return None;
        }
        let (black, white) = self.disc_counts();
        if black > white {
            Some(Player::One)
        } else if white > black {
            Some(Player::Two)
        } else {
            None // Draw
        }
    }

    fn get_current_player(&self) -> Player {
        self.current_player
    }
}

impl OthelloState {
    /// Creates a new Othello game with the standard starting position
    ///
    /// Sets up the board with 4 pieces in the center in the traditional pattern.
    /// Black (Player One) starts first.
    pub fn new() -> Self {
        let mut board = vec![None; SIZE * SIZE];
        let center = SIZE / 2;
        board[(center - 1) * SIZE + center - 1] = Some(Player::Two);
        board[(center - 1) * SIZE + center] = Some(Player::One);
        board[center * SIZE + center - 1] = Some(Player::One);
        board[center * SIZE + center] = Some(Player::Two);
        OthelloState {
            board,
            current_player: Player::One,
            last_move: None,
        }
    }

    /// Builds an arbitrary position. Returns `None` if `cells` is not 64 long.
    pub fn from_cells(cells: Vec<Option<Player>>, to_move: Player) -> Option<Self> {
        if cells.len() != SIZE * SIZE {
            return None;
        }
        Some(OthelloState {
            board: cells,
            current_player: to_move,
            last_move: None,
        })
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        self.board[row * SIZE + col]
    }

    pub fn get_last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    /// (black, white) disc counts.
    pub fn disc_counts(&self) -> (usize, usize) {
        let black = self.board.iter().filter(|c| **c == Some(Player::One)).count();
        let white = self.board.iter().filter(|c| **c == Some(Player::Two)).count();
        (black, white)
    }

    /// Checks if a move is legal in the current game state
    ///
    /// A move is legal if it's on an empty square and would flip at least one opponent piece.
    pub fn is_legal(&self, mv: &OthelloMove) -> bool {
        mv.0 < SIZE && mv.1 < SIZE && !self.captures(mv.0, mv.1, self.current_player).is_empty()
    }

    /// Every cell where `player` could place a disc, whether or not it is their turn.
    pub fn legal_moves_for(&self, player: Player) -> Vec<OthelloMove> {
        let mut moves = Vec::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                if !self.captures(r, c, player).is_empty() {
                    moves.push(OthelloMove(r, c));
                }
            }
        }
        moves
    }

    /// Validated move application.
    pub fn apply_move(&mut self, player: Player, mv: OthelloMove) -> Result<OthelloOutcome, MoveValidationError> {
        if self.is_terminal() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if player != self.current_player {
            return Err(MoveValidationError::NotYourTurn);
        }
        if mv.0 >= SIZE || mv.1 >= SIZE {
            return Err(MoveValidationError::illegal(format!("({}, {}) is off the board", mv.0, mv.1)));
        }
        if self.cell(mv.0, mv.1).is_some() {
            return Err(MoveValidationError::illegal(format!("({}, {}) is occupied", mv.0, mv.1)));
        }
        let flipped = self.captures(mv.0, mv.1, player).len();
        if flipped == 0 {
            return Err(MoveValidationError::illegal(format!("({}, {}) flanks no discs", mv.0, mv.1)));
        }
        let turn = self.make_move(&mv);
        Ok(OthelloOutcome { flipped, turn })
    }

    /// Every opponent disc that placing `player` at `(r, c)` would flip.
    ///
    /// Scans all 8 directions; a run of opponent discs only counts when it is
    /// closed by one of `player`'s own discs. Empty for occupied cells.
    fn captures(&self, r: usize, c: usize, player: Player) -> Vec<usize> {
        let mut flips = Vec::new();
        if self.board[r * SIZE + c].is_some() {
            return flips;
        }
        let opponent = player.opponent();
        for &(dr, dc) in COMPASS.iter() {
            let mut line = Vec::new();
            let mut pos = board_shared::step(r, c, dr, dc, SIZE, SIZE);
            while let Some((nr, nc)) = pos {
                match self.board[nr * SIZE + nc] {
                    Some(p) if p == opponent => line.push(nr * SIZE + nc),
                    Some(_) => {
                        flips.extend(line);
                        break;
                    }
                    None => break,
                }
                pos = board_shared::step(nr, nc, dr, dc, SIZE, SIZE);
            }
        }
        flips
    }

    fn place(&mut self, mv: &OthelloMove, player: Player) {
        for idx in self.captures(mv.0, mv.1, player) {
            self.board[idx] = Some(player);
        }
        self.board[mv.0 * SIZE + mv.1] = Some(player);
        self.last_move = Some((mv.0, mv.1));
    }
}

impl FromStr for OthelloMove {
    type Err = String;

    /// Creates an OthelloMove from a string representation
    ///
    /// Expected format is "row,col" where both are 0-based indices.
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use arena::games::othello::OthelloMove;
    /// let mv = OthelloMove::from_str("3,4").unwrap();
    /// assert_eq!(mv, OthelloMove(3, 4));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err("Expected format: r,c".to_string());
        }
        let r = parts[0].parse::<usize>().map_err(|e| e.to_string())?;
        let c = parts[1].parse::<usize>().map_err(|e| e.to_string())?;
        Ok(OthelloMove(r, c))
    }
}

/// Score for a finished game, above anything the positional heuristic reaches.
const DECISIVE: i32 = 10_000;

/// Positional weights plus mobility; finished games score decisively.
pub struct OthelloEvaluator {
    pub mobility_weight: i32,
}

impl Evaluator<OthelloState> for OthelloEvaluator {
    fn evaluate(&self, state: &OthelloState, perspective: Player, _ply: usize) -> i32 {
        if state.is_terminal() {
            let (black, white) = state.disc_counts();
            let diff = black as i32 - white as i32;
            let diff = if perspective == Player::One { diff } else { -diff };
            return match diff {
                0 => 0,
                d if d > 0 => DECISIVE + d,
                d => -DECISIVE + d,
            };
        }

        let mut score = 0;
        for r in 0..SIZE {
            for c in 0..SIZE {
                match state.cell(r, c) {
                    Some(p) if p == perspective => score += POSITION_WEIGHTS[r][c],
                    Some(_) => score -= POSITION_WEIGHTS[r][c],
                    None => {}
                }
            }
        }
        let mine = state.legal_moves_for(perspective).len() as i32;
        let theirs = state.legal_moves_for(perspective.opponent()).len() as i32;
        score + (mine - theirs) * self.mobility_weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OthelloAi {
    /// Plies searched, the computer's own move included.
    pub search_depth: usize,
    pub mobility_weight: i32,
}

impl Default for OthelloAi {
    fn default() -> Self {
        Self { search_depth: 4, mobility_weight: 5 }
    }
}

impl ComputerPlayer<OthelloState> for OthelloAi {
    fn choose_move<R: Rng + ?Sized>(&self, state: &OthelloState, difficulty: Difficulty, rng: &mut R) -> Option<OthelloMove> {
        match difficulty {
            Difficulty::Easy => search::random_move(state, rng),
            Difficulty::Hard => {
                let evaluator = OthelloEvaluator { mobility_weight: self.mobility_weight };
                search::choose_minimax_move(state, self.search_depth, &evaluator, rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Independent legality check: walk each direction by hand.
    fn naive_is_legal(state: &OthelloState, r: usize, c: usize, player: Player) -> bool {
        if state.cell(r, c).is_some() {
            return false;
        }
        for (dr, dc) in COMPASS {
            let (mut nr, mut nc) = (r as i32 + dr, c as i32 + dc);
            let mut seen_opponent = false;
            while (0..SIZE as i32).contains(&nr) && (0..SIZE as i32).contains(&nc) {
                match state.cell(nr as usize, nc as usize) {
                    Some(p) if p != player => seen_opponent = true,
                    Some(_) => {
                        if seen_opponent {
                            return true;
                        }
                        break;
                    }
                    None => break,
                }
                nr += dr;
                nc += dc;
            }
        }
        false
    }

    #[test]
    fn test_opening_moves() {
        let game = OthelloState::new();
        let mut moves = game.get_possible_moves();
        moves.sort_by_key(|m| (m.0, m.1));
        assert_eq!(moves, vec![OthelloMove(2, 3), OthelloMove(3, 2), OthelloMove(4, 5), OthelloMove(5, 4)]);
        assert_eq!(game.disc_counts(), (2, 2));
    }

    #[test]
    fn test_flip_on_opening_move() {
        let mut game = OthelloState::new();
        let outcome = game.apply_move(Player::One, OthelloMove(2, 3)).unwrap();
        assert_eq!(outcome.flipped, 1);
        assert_eq!(outcome.turn, TurnOutcome::Alternate);
        assert_eq!(game.cell(3, 3), Some(Player::One));
        assert_eq!(game.disc_counts(), (4, 1));
        assert_eq!(game.get_current_player(), Player::Two);
    }

    #[test]
    fn test_flips_multiple_directions_without_partial_runs() {
        // Row 3: B W W . W  with no closing disc to the east, and column 3 closed by B.
        let mut cells = vec![None; SIZE * SIZE];
        cells[3 * SIZE] = Some(Player::One);
        cells[3 * SIZE + 1] = Some(Player::Two);
        cells[3 * SIZE + 2] = Some(Player::Two);
        cells[3 * SIZE + 4] = Some(Player::Two);
        cells[4 * SIZE + 3] = Some(Player::Two);
        cells[5 * SIZE + 3] = Some(Player::One);
        let mut game = OthelloState::from_cells(cells, Player::One).unwrap();
        let outcome = game.apply_move(Player::One, OthelloMove(3, 3)).unwrap();
        assert_eq!(outcome.flipped, 3);
        assert_eq!(game.cell(3, 1), Some(Player::One));
        assert_eq!(game.cell(3, 2), Some(Player::One));
        assert_eq!(game.cell(4, 3), Some(Player::One));
        // The eastern disc had no closing black disc behind it.
        assert_eq!(game.cell(3, 4), Some(Player::Two));
    }

    #[test]
    fn test_rejects_move_that_flanks_nothing() {
        let mut game = OthelloState::new();
        let before = game.clone();
        let err = game.apply_move(Player::One, OthelloMove(0, 0)).unwrap_err();
        assert!(matches!(err, MoveValidationError::IllegalMove(_)));
        assert_eq!(game, before);
        assert_eq!(game.apply_move(Player::Two, OthelloMove(2, 3)), Err(MoveValidationError::NotYourTurn));
    }

    #[test]
    fn test_legal_moves_match_rescan_through_a_game() {
        let mut rng = crate::GameRng::seed_from_u64(77);
        for _ in 0..5 {
            let mut game = OthelloState::new();
            while !game.is_terminal() {
                for player in [Player::One, Player::Two] {
                    let generated = game.legal_moves_for(player);
                    for r in 0..SIZE {
                        for c in 0..SIZE {
                            assert_eq!(
                                generated.contains(&OthelloMove(r, c)),
                                naive_is_legal(&game, r, c, player)
                            );
                        }
                    }
                }
                let mv = search::random_move(&game, &mut rng).unwrap();
                game.make_move(&mv);
            }
        }
    }

    #[test]
    fn test_pass_when_opponent_is_blocked() {
        // White's only disc gets captured: white has nothing left, game over.
        let mut cells = vec![None; SIZE * SIZE];
        cells[0] = Some(Player::One);
        cells[1] = Some(Player::Two);
        let mut game = OthelloState::from_cells(cells.clone(), Player::One).unwrap();
        game.make_move(&OthelloMove(0, 2));
        assert!(game.is_terminal());
        assert_eq!(game.get_winner(), Some(Player::One));

        // Black moves, white cannot answer but black still can: black goes again.
        cells[7 * SIZE + 7] = Some(Player::One);
        cells[7 * SIZE + 6] = Some(Player::Two);
        let mut game = OthelloState::from_cells(cells, Player::One).unwrap();
        let outcome = game.make_move(&OthelloMove(0, 2));
        assert_eq!(outcome, TurnOutcome::OpponentPassed);
        assert_eq!(game.get_current_player(), Player::One);
    }

    #[test]
    fn test_hard_prefers_corner() {
        // Black can take the a1 corner or an edge cell.
        let mut cells = vec![None; SIZE * SIZE];
        cells[SIZE + 1] = Some(Player::Two);
        cells[2 * SIZE + 2] = Some(Player::One);
        cells[3 * SIZE + 3] = Some(Player::Two);
        cells[3 * SIZE + 4] = Some(Player::One);
        let game = OthelloState::from_cells(cells, Player::One).unwrap();
        assert!(game.get_possible_moves().contains(&OthelloMove(0, 0)));
        let mut rng = crate::GameRng::seed_from_u64(3);
        let mv = OthelloAi::default().choose_move(&game, Difficulty::Hard, &mut rng);
        assert_eq!(mv, Some(OthelloMove(0, 0)));
    }

    #[test]
    fn test_easy_plays_a_legal_move() {
        let game = OthelloState::new();
        let mut rng = crate::GameRng::seed_from_u64(12);
        let mv = OthelloAi::default().choose_move(&game, Difficulty::Easy, &mut rng).unwrap();
        assert!(game.is_legal(&mv));
    }
}
