//! # Mancala (Kalah) Game Implementation
//!
//! Fourteen positions: Player One owns pits 0..=5 and the store at 6, Player
//! Two owns pits 7..=12 and the store at 13. Each pit starts with four stones.
//!
//! ## Rules
//! - Pick one of your non-empty pits and sow its stones counter-clockwise,
//!   one per position, skipping the opponent's store
//! - Ending in your own store grants another turn
//! - Ending in one of your own pits that was empty captures that stone plus the
//!   stones in the opposite pit (`12 - i`), if the opposite pit has any
//! - The game ends when either side's pits are all empty; the remaining stones
//!   on each side are swept into that side's store and the larger store wins
//!
//! ## Computer player
//! - **Easy**: 70% of the time the move that maximizes the store difference
//!   right after it, otherwise a uniformly random move
//! - **Hard**: alpha-beta minimax, 6 plies by default

use crate::search::{self, Evaluator};
use crate::{ComputerPlayer, Difficulty, GameState, MoveValidationError, Player, TurnOutcome};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PITS_PER_SIDE: usize = 6;
pub const STONES_PER_PIT: u32 = 4;
const POSITIONS: usize = 2 * PITS_PER_SIDE + 2;
const STORE_ONE: usize = PITS_PER_SIDE;
const STORE_TWO: usize = POSITIONS - 1;

/// Index of the pit to sow from, 0..=5 for Player One, 7..=12 for Player Two.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct MancalaMove(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MancalaState {
    board: [u32; POSITIONS],
    current_player: Player,
    last_move: Option<usize>,
}

/// What a sowing did besides moving stones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MancalaOutcome {
    pub turn: TurnOutcome,
    /// Stones moved to the store by a capture, zero if none happened.
    pub captured: u32,
    pub game_over: bool,
}

impl Default for MancalaState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MancalaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "     ")?;
        for pit in (PITS_PER_SIDE + 1..STORE_TWO).rev() {
            write!(f, "{:>3}", self.board[pit])?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>3} {:>w$} {:>3}",
            self.board[STORE_TWO],
            "",
            self.board[STORE_ONE],
            w = PITS_PER_SIDE * 3
        )?;
        write!(f, "     ")?;
        for pit in 0..STORE_ONE {
            write!(f, "{:>3}", self.board[pit])?;
        }
        writeln!(f)
    }
}

impl GameState for MancalaState {
    type Move = MancalaMove;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        self.legal_moves_for(self.current_player)
    }

    fn make_move(&mut self, mv: &Self::Move) -> TurnOutcome {
        self.sow(mv.0).turn
    }

    fn is_terminal(&self) -> bool {
        Self::side_empty(&self.board, Player::One) || Self::side_empty(&self.board, Player::Two)
    }

    fn get_winner(&self) -> Option<Player> {
        if !self.is_terminal() {
            return None;
        }
        let (one, two) = self.final_scores();
        if one > two {
            Some(Player::One)
        } else if two > one {
            Some(Player::Two)
        } else {
            None
        }
    }

    fn get_current_player(&self) -> Player {
        self.current_player
    }
}

impl MancalaState {
    pub fn new() -> Self {
        let mut board = [STONES_PER_PIT; POSITIONS];
        board[STORE_ONE] = 0;
        board[STORE_TWO] = 0;
        Self {
            board,
            current_player: Player::One,
            last_move: None,
        }
    }

    /// Builds an arbitrary position (used for puzzles and tests).
    pub fn from_board(board: [u32; POSITIONS], to_move: Player) -> Self {
        Self {
            board,
            current_player: to_move,
            last_move: None,
        }
    }

    pub fn board(&self) -> &[u32; POSITIONS] {
        &self.board
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn store_index(player: Player) -> usize {
        match player {
            Player::One => STORE_ONE,
            Player::Two => STORE_TWO,
        }
    }

    /// Pit indices owned by `player`, stores excluded.
    pub fn pits(player: Player) -> std::ops::Range<usize> {
        match player {
            Player::One => 0..STORE_ONE,
            Player::Two => STORE_ONE + 1..STORE_TWO,
        }
    }

    pub fn store(&self, player: Player) -> u32 {
        self.board[Self::store_index(player)]
    }

    /// Stores plus whatever is still on each side; equals the stores once the
    /// game is over because the sweep has already happened.
    pub fn final_scores(&self) -> (u32, u32) {
        let side = |p: Player| -> u32 { Self::pits(p).map(|i| self.board[i]).sum() };
        (
            self.store(Player::One) + side(Player::One),
            self.store(Player::Two) + side(Player::Two),
        )
    }

    pub fn legal_moves_for(&self, player: Player) -> Vec<MancalaMove> {
        if self.is_terminal() {
            return Vec::new();
        }
        Self::pits(player)
            .filter(|&i| self.board[i] > 0)
            .map(MancalaMove)
            .collect()
    }

    /// Validated move application.
    pub fn apply_move(&mut self, player: Player, mv: MancalaMove) -> Result<MancalaOutcome, MoveValidationError> {
        if self.is_terminal() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if player != self.current_player {
            return Err(MoveValidationError::NotYourTurn);
        }
        if !Self::pits(player).contains(&mv.0) {
            return Err(MoveValidationError::illegal(format!("pit {} does not belong to {}", mv.0, player)));
        }
        if self.board[mv.0] == 0 {
            return Err(MoveValidationError::illegal(format!("pit {} is empty", mv.0)));
        }
        Ok(self.sow(mv.0))
    }

    fn side_empty(board: &[u32; POSITIONS], player: Player) -> bool {
        Self::pits(player).all(|i| board[i] == 0)
    }

    fn sow(&mut self, pit: usize) -> MancalaOutcome {
        let player = self.current_player;
        let skip = Self::store_index(player.opponent());
        let own_store = Self::store_index(player);

        let mut stones = std::mem::take(&mut self.board[pit]);
        let mut idx = pit;
        while stones > 0 {
            idx = (idx + 1) % POSITIONS;
            if idx == skip {
                continue;
            }
            self.board[idx] += 1;
            stones -= 1;
        }
        self.last_move = Some(pit);

        let mut captured = 0;
        if Self::pits(player).contains(&idx) && self.board[idx] == 1 {
            let opposite = 2 * PITS_PER_SIDE - idx;
            if self.board[opposite] > 0 {
                captured = self.board[opposite] + 1;
                self.board[opposite] = 0;
                self.board[idx] = 0;
                self.board[own_store] += captured;
            }
        }

        let game_over = self.is_terminal();
        if game_over {
            for p in [Player::One, Player::Two] {
                let swept: u32 = Self::pits(p).map(|i| std::mem::take(&mut self.board[i])).sum();
                self.board[Self::store_index(p)] += swept;
            }
        }

        let turn = if idx == own_store && !game_over {
            TurnOutcome::ExtraTurn
        } else {
            self.current_player = player.opponent();
            TurnOutcome::Alternate
        };
        MancalaOutcome { turn, captured, game_over }
    }
}

impl FromStr for MancalaMove {
    type Err = String;

    /// Parses an absolute pit index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pit = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(MancalaMove(pit))
    }
}

/// Store difference weighted over the difference of stones still in pits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MancalaWeights {
    pub store: i32,
    pub side: i32,
    pub terminal: i32,
}

impl Default for MancalaWeights {
    fn default() -> Self {
        Self { store: 10, side: 1, terminal: 10_000 }
    }
}

pub struct MancalaEvaluator {
    pub weights: MancalaWeights,
}

impl Evaluator<MancalaState> for MancalaEvaluator {
    fn evaluate(&self, state: &MancalaState, perspective: Player, _ply: usize) -> i32 {
        let sign = |one: i32, two: i32| if perspective == Player::One { one - two } else { two - one };
        if state.is_terminal() {
            let (one, two) = state.final_scores();
            return match sign(one as i32, two as i32) {
                0 => 0,
                d if d > 0 => self.weights.terminal + d,
                d => -self.weights.terminal + d,
            };
        }
        let side = |p: Player| -> i32 { MancalaState::pits(p).map(|i| state.board[i] as i32).sum() };
        let stores = sign(state.store(Player::One) as i32, state.store(Player::Two) as i32);
        let sides = sign(side(Player::One), side(Player::Two));
        stores * self.weights.store + sides * self.weights.side
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MancalaAi {
    pub search_depth: usize,
    /// Chance that easy plays its greedy move rather than a random one.
    pub greedy_probability: f64,
    pub weights: MancalaWeights,
}

impl Default for MancalaAi {
    fn default() -> Self {
        Self {
            search_depth: 6,
            greedy_probability: 0.7,
            weights: MancalaWeights::default(),
        }
    }
}

impl MancalaAi {
    /// Store difference right after each move, from the mover's side.
    fn greedy_scores(state: &MancalaState) -> Vec<(MancalaMove, i32)> {
        let me = state.get_current_player();
        state
            .get_possible_moves()
            .into_iter()
            .map(|mv| {
                let mut child = state.clone();
                child.make_move(&mv);
                let diff = child.store(me) as i32 - child.store(me.opponent()) as i32;
                (mv, diff)
            })
            .collect()
    }
}

impl ComputerPlayer<MancalaState> for MancalaAi {
    fn choose_move<R: Rng + ?Sized>(&self, state: &MancalaState, difficulty: Difficulty, rng: &mut R) -> Option<MancalaMove> {
        match difficulty {
            Difficulty::Easy => {
                if rng.random_bool(self.greedy_probability.clamp(0.0, 1.0)) {
                    search::pick_best(Self::greedy_scores(state), rng)
                } else {
                    search::random_move(state, rng)
                }
            }
            Difficulty::Hard => {
                let evaluator = MancalaEvaluator { weights: self.weights };
                search::choose_minimax_move(state, self.search_depth, &evaluator, rng)
            }
        }
    }
}
