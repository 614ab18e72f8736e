//! # Lights Out
//!
//! A 5x5 grid of lights. Pressing a cell toggles it and its orthogonal
//! neighbours; the puzzle is solved when every light is off. Puzzles are made
//! by pressing random cells on a dark board, so every scramble is solvable.

use crate::MoveValidationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct LightsOutMove(pub usize, pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightsOutSettings {
    pub size: usize,
    /// Random presses used to build a puzzle.
    pub scramble_presses: usize,
}

impl Default for LightsOutSettings {
    fn default() -> Self {
        Self { size: 5, scramble_presses: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightsOutState {
    size: usize,
    lights: Vec<bool>,
    moves: u32,
}

impl fmt::Display for LightsOutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                write!(f, "{}", if self.is_lit(r, c) { " O" } else { " ." })?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Moves: {}", self.moves)
    }
}

impl LightsOutState {
    /// All lights off.
    pub fn dark(size: usize) -> Self {
        Self {
            size,
            lights: vec![false; size * size],
            moves: 0,
        }
    }

    /// A fresh puzzle. Scrambles again if the presses happen to cancel out.
    pub fn scrambled<R: Rng + ?Sized>(settings: &LightsOutSettings, rng: &mut R) -> Self {
        let size = settings.size.max(1);
        let mut presses = settings.scramble_presses.max(1);
        // A single cell is lit only after an odd number of presses.
        if size == 1 && presses % 2 == 0 {
            presses += 1;
        }
        loop {
            let mut state = Self::dark(size);
            for _ in 0..presses {
                let r = rng.random_range(0..size);
                let c = rng.random_range(0..size);
                state.toggle(r, c);
            }
            if !state.is_solved() {
                return state;
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        self.lights[row * self.size + col]
    }

    pub fn lit_count(&self) -> usize {
        self.lights.iter().filter(|l| **l).count()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.lights.iter().all(|l| !l)
    }

    /// Every cell is always pressable while the puzzle is unsolved.
    pub fn legal_moves(&self) -> Vec<LightsOutMove> {
        if self.is_solved() {
            return Vec::new();
        }
        (0..self.size)
            .flat_map(|r| (0..self.size).map(move |c| LightsOutMove(r, c)))
            .collect()
    }

    /// A counted player press.
    pub fn press(&mut self, mv: LightsOutMove) -> Result<(), MoveValidationError> {
        if self.is_solved() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if mv.0 >= self.size || mv.1 >= self.size {
            return Err(MoveValidationError::illegal(format!("({}, {}) is off the board", mv.0, mv.1)));
        }
        self.toggle(mv.0, mv.1);
        self.moves += 1;
        Ok(())
    }

    /// Flips a cell and its neighbours without counting a move.
    pub fn toggle(&mut self, row: usize, col: usize) {
        self.lights[row * self.size + col] ^= true;
        for (r, c) in board_shared::orthogonal_neighbors(row, col, self.size, self.size).into_iter().flatten() {
            self.lights[r * self.size + c] ^= true;
        }
    }
}

impl FromStr for LightsOutMove {
    type Err = String;

    /// Parses "row,col".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err("Expected format: r,c".to_string());
        }
        let r = parts[0].parse::<usize>().map_err(|e| e.to_string())?;
        let c = parts[1].parse::<usize>().map_err(|e| e.to_string())?;
        Ok(LightsOutMove(r, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_corner_press_toggles_three() {
        let mut state = LightsOutState::dark(5);
        state.toggle(0, 0);
        assert_eq!(state.lit_count(), 3);
        assert!(state.is_lit(0, 1) && state.is_lit(1, 0));
    }

    #[test]
    fn test_press_is_an_involution() {
        let mut rng = crate::GameRng::seed_from_u64(42);
        let start = LightsOutState::scrambled(&LightsOutSettings::default(), &mut rng);
        for r in 0..5 {
            for c in 0..5 {
                let mut state = start.clone();
                state.press(LightsOutMove(r, c)).unwrap();
                state.toggle(r, c);
                assert_eq!(state.lights, start.lights);
            }
        }
    }

    #[test]
    fn test_scramble_is_never_solved() {
        let mut rng = crate::GameRng::seed_from_u64(0);
        for _ in 0..50 {
            let state = LightsOutState::scrambled(&LightsOutSettings::default(), &mut rng);
            assert!(!state.is_solved());
            assert_eq!(state.moves(), 0);
        }
    }

    #[test]
    fn test_single_cell_board_scrambles() {
        let mut rng = crate::GameRng::seed_from_u64(5);
        for presses in [1, 2, 10] {
            let settings = LightsOutSettings { size: 1, scramble_presses: presses };
            let state = LightsOutState::scrambled(&settings, &mut rng);
            assert!(state.is_lit(0, 0));
        }
    }

    #[test]
    fn test_solving_counts_moves_and_locks_board() {
        let mut state = LightsOutState::dark(5);
        state.toggle(2, 2);
        state.press(LightsOutMove(2, 2)).unwrap();
        assert!(state.is_solved());
        assert_eq!(state.moves(), 1);
        assert_eq!(state.press(LightsOutMove(0, 0)), Err(MoveValidationError::GameAlreadyOver));
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn test_off_board_press_rejected() {
        let mut state = LightsOutState::dark(5);
        state.toggle(0, 0);
        let before = state.clone();
        assert!(matches!(state.press(LightsOutMove(5, 0)), Err(MoveValidationError::IllegalMove(_))));
        assert_eq!(state, before);
    }
}
