//! # Nim (misère)
//!
//! Three piles of 3, 5 and 7 stones. On each turn a player removes one or more
//! stones from a single pile; whoever takes the last stone loses.
//!
//! ## Computer player
//! - **Easy**: uniformly random legal removal
//! - **Hard**: the misère strategy. While at least two piles hold more than one
//!   stone it plays ordinary nim (leave a zero nim-sum). Once only one pile is
//!   larger than one, it shrinks that pile to 0 or 1 so that an odd number of
//!   single-stone piles remains. With only single-stone piles left there is
//!   nothing to decide.

use crate::{ComputerPlayer, Difficulty, GameState, MoveValidationError, Player, TurnOutcome};
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const STARTING_PILES: [u32; 3] = [3, 5, 7];

/// Remove `amount` stones from pile `pile` (0-based).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct NimMove {
    pub pile: usize,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NimState {
    piles: Vec<u32>,
    current_player: Player,
    /// Whoever emptied the board; they lose.
    last_taker: Option<Player>,
}

impl Default for NimState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &pile) in self.piles.iter().enumerate() {
            writeln!(f, "{}: {:<7} ({})", i, "|".repeat(pile as usize), pile)?;
        }
        Ok(())
    }
}

impl GameState for NimState {
    type Move = NimMove;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        let mut moves = Vec::new();
        for (pile, &count) in self.piles.iter().enumerate() {
            for amount in 1..=count {
                moves.push(NimMove { pile, amount });
            }
        }
        moves
    }

    fn make_move(&mut self, mv: &Self::Move) -> TurnOutcome {
        self.piles[mv.pile] -= mv.amount;
        if self.is_terminal() {
            self.last_taker = Some(self.current_player);
        }
        self.current_player = self.current_player.opponent();
        TurnOutcome::Alternate
    }

    fn is_terminal(&self) -> bool {
        self.piles.iter().all(|&p| p == 0)
    }

    fn get_winner(&self) -> Option<Player> {
        self.last_taker.map(|loser| loser.opponent())
    }

    fn get_current_player(&self) -> Player {
        self.current_player
    }
}

impl NimState {
    pub fn new() -> Self {
        Self::with_piles(STARTING_PILES.to_vec(), Player::One)
    }

    pub fn with_piles(piles: Vec<u32>, to_move: Player) -> Self {
        Self {
            piles,
            current_player: to_move,
            last_taker: None,
        }
    }

    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    pub fn nim_sum(&self) -> u32 {
        nim_sum(&self.piles)
    }

    pub fn legal_moves_for(&self, player: Player) -> Vec<NimMove> {
        if player == self.current_player {
            self.get_possible_moves()
        } else {
            Vec::new()
        }
    }

    /// Validated move application. Malformed takes are input errors.
    pub fn apply_move(&mut self, player: Player, mv: NimMove) -> Result<TurnOutcome, MoveValidationError> {
        if self.is_terminal() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if player != self.current_player {
            return Err(MoveValidationError::NotYourTurn);
        }
        let Some(&available) = self.piles.get(mv.pile) else {
            return Err(MoveValidationError::invalid(format!("there is no pile {}", mv.pile)));
        };
        if mv.amount == 0 {
            return Err(MoveValidationError::invalid("take at least one stone"));
        }
        if mv.amount > available {
            return Err(MoveValidationError::invalid(format!(
                "pile {} only has {} stones",
                mv.pile, available
            )));
        }
        Ok(self.make_move(&mv))
    }
}

impl FromStr for NimMove {
    type Err = String;

    /// Parses "pile,amount".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err("Expected format: pile,amount".to_string());
        }
        let pile = parts[0].parse::<usize>().map_err(|e| e.to_string())?;
        let amount = parts[1].parse::<u32>().map_err(|e| e.to_string())?;
        Ok(NimMove { pile, amount })
    }
}

pub fn nim_sum(piles: &[u32]) -> u32 {
    piles.iter().fold(0, |acc, &p| acc ^ p)
}

/// Misère strategy move. Returns `None` only when every pile is empty.
pub fn misere_move(piles: &[u32]) -> Option<NimMove> {
    let largest = piles
        .iter()
        .enumerate()
        .filter(|&(_, &p)| p > 0)
        .max_by_key(|&(_, &p)| p)
        .map(|(i, _)| i)?;
    let big: Vec<usize> = (0..piles.len()).filter(|&i| piles[i] > 1).collect();

    match big.as_slice() {
        // Only single stones: forced.
        [] => Some(NimMove { pile: largest, amount: 1 }),
        [only] => {
            let singles = piles.iter().filter(|&&p| p == 1).count();
            // Leave an odd count of single-stone piles for the opponent.
            let keep = if singles % 2 == 1 { 0 } else { 1 };
            Some(NimMove { pile: *only, amount: piles[*only] - keep })
        }
        _ => {
            let sum = nim_sum(piles);
            if sum == 0 {
                return Some(NimMove { pile: largest, amount: 1 });
            }
            piles.iter().enumerate().find_map(|(i, &p)| {
                let target = p ^ sum;
                (target < p).then(|| NimMove { pile: i, amount: p - target })
            })
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NimAi;

impl ComputerPlayer<NimState> for NimAi {
    fn choose_move<R: Rng + ?Sized>(&self, state: &NimState, difficulty: Difficulty, rng: &mut R) -> Option<NimMove> {
        if state.is_terminal() {
            return None;
        }
        match difficulty {
            Difficulty::Easy => {
                let nonempty: Vec<usize> = (0..state.piles.len()).filter(|&i| state.piles[i] > 0).collect();
                let pile = nonempty[rng.random_range(0..nonempty.len())];
                let amount = rng.random_range(1..=state.piles[pile]);
                Some(NimMove { pile, amount })
            }
            Difficulty::Hard => {
                let mv = misere_move(&state.piles);
                trace!("misère move for {:?}: {:?}", state.piles, mv);
                mv
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_taking_last_stone_loses() {
        let mut game = NimState::with_piles(vec![0, 0, 1], Player::One);
        game.apply_move(Player::One, NimMove { pile: 2, amount: 1 }).unwrap();
        assert!(game.is_terminal());
        assert_eq!(game.get_winner(), Some(Player::Two));
    }

    #[test]
    fn test_invalid_takes_are_rejected() {
        let mut game = NimState::new();
        let zero = game.apply_move(Player::One, NimMove { pile: 0, amount: 0 });
        assert!(matches!(zero, Err(MoveValidationError::InvalidInput(_))));
        let too_many = game.apply_move(Player::One, NimMove { pile: 0, amount: 4 });
        assert!(matches!(too_many, Err(MoveValidationError::InvalidInput(_))));
        let no_pile = game.apply_move(Player::One, NimMove { pile: 3, amount: 1 });
        assert!(matches!(no_pile, Err(MoveValidationError::InvalidInput(_))));
        assert_eq!(game.piles(), &STARTING_PILES);
    }

    #[test]
    fn test_endgame_leaves_odd_singles() {
        // One big pile and two singles: leave one stone so three singles remain.
        assert_eq!(misere_move(&[1, 1, 5]), Some(NimMove { pile: 2, amount: 4 }));
        // One big pile and one single: empty the big pile.
        assert_eq!(misere_move(&[0, 1, 4]), Some(NimMove { pile: 2, amount: 4 }));
        // Lone big pile: leave exactly one.
        assert_eq!(misere_move(&[0, 0, 6]), Some(NimMove { pile: 2, amount: 5 }));
    }

    #[test]
    fn test_midgame_zeroes_nim_sum() {
        let piles = [3, 5, 7];
        let mv = misere_move(&piles).unwrap();
        let mut after = piles;
        after[mv.pile] -= mv.amount;
        assert_eq!(nim_sum(&after), 0);
    }

    #[test]
    fn test_losing_position_takes_one_from_largest() {
        assert_eq!(misere_move(&[2, 3, 1]), Some(NimMove { pile: 1, amount: 1 }));
        assert_eq!(misere_move(&[0, 0, 0]), None);
    }

    #[test]
    fn test_easy_moves_are_legal() {
        let game = NimState::with_piles(vec![0, 2, 0], Player::Two);
        let mut rng = crate::GameRng::seed_from_u64(6);
        for _ in 0..20 {
            let mv = NimAi.choose_move(&game, Difficulty::Easy, &mut rng).unwrap();
            assert_eq!(mv.pile, 1);
            assert!((1..=2).contains(&mv.amount));
        }
    }

    #[test]
    fn test_move_parsing() {
        assert_eq!("1, 3".parse::<NimMove>(), Ok(NimMove { pile: 1, amount: 3 }));
        assert!("1".parse::<NimMove>().is_err());
    }
}
