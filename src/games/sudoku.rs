//! # Sudoku
//!
//! Puzzle generation and play for the classic 9x9 grid.
//!
//! A puzzle is generated by filling an empty grid with randomized
//! backtracking, then clearing cells in shuffled order. A clearing is kept
//! only while the puzzle still has exactly one solution, and generation stops
//! once `floor(81 * fraction)` cells are cleared (or no cell can be cleared).
//!
//! Play follows a palette: entering `0` erases a cell, entering the digit a
//! cell already holds clears it, and given cells never change.

use crate::MoveValidationError;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SIDE: usize = 9;
pub const CELLS: usize = SIDE * SIDE;
const BOX: usize = 3;

pub type Grid = [u8; CELLS];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SudokuSettings {
    /// Share of the 81 cells the generator tries to clear.
    pub fraction: f64,
}

impl Default for SudokuSettings {
    fn default() -> Self {
        Self { fraction: 0.65 }
    }
}

/// Bitmask of digits 1..=9 that can go in `idx` (bit `d` set means allowed).
fn candidates(grid: &Grid, idx: usize) -> u16 {
    let (row, col) = (idx / SIDE, idx % SIDE);
    let (box_row, box_col) = (row / BOX * BOX, col / BOX * BOX);
    let mut used = 0u16;
    for i in 0..SIDE {
        used |= 1 << grid[row * SIDE + i];
        used |= 1 << grid[i * SIDE + col];
        used |= 1 << grid[(box_row + i / BOX) * SIDE + box_col + i % BOX];
    }
    !used & 0b11_1111_1110
}

/// True when `digit` does not repeat in the row, column or box of `idx`.
pub fn is_valid_placement(grid: &Grid, idx: usize, digit: u8) -> bool {
    let mut scratch = *grid;
    scratch[idx] = 0;
    candidates(&scratch, idx) & (1 << digit) != 0
}

/// Empty cell with the fewest candidates, or `None` when the grid is full.
fn most_constrained(grid: &Grid) -> Option<(usize, u16)> {
    let mut best: Option<(usize, u16)> = None;
    for idx in (0..CELLS).filter(|&i| grid[i] == 0) {
        let mask = candidates(grid, idx);
        if best.map_or(true, |(_, m)| mask.count_ones() < m.count_ones()) {
            best = Some((idx, mask));
            if mask.count_ones() <= 1 {
                break;
            }
        }
    }
    best
}

/// Randomized backtracking fill. Returns false if the grid cannot be completed.
pub fn fill_grid<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> bool {
    let Some(idx) = grid.iter().position(|&d| d == 0) else {
        return true;
    };
    let mut digits: [u8; SIDE] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    digits.shuffle(rng);
    let mask = candidates(grid, idx);
    for digit in digits {
        if mask & (1 << digit) == 0 {
            continue;
        }
        grid[idx] = digit;
        if fill_grid(grid, rng) {
            return true;
        }
    }
    grid[idx] = 0;
    false
}

/// Counts solutions of `grid`, stopping as soon as `cap` are found.
pub fn count_solutions(grid: &Grid, cap: usize) -> usize {
    let mut work = *grid;
    let mut count = 0;
    count_into(&mut work, cap, &mut count);
    count
}

fn count_into(grid: &mut Grid, cap: usize, count: &mut usize) {
    if *count >= cap {
        return;
    }
    let Some((idx, mask)) = most_constrained(grid) else {
        *count += 1;
        return;
    };
    for digit in 1..=SIDE as u8 {
        if mask & (1 << digit) == 0 {
            continue;
        }
        grid[idx] = digit;
        count_into(grid, cap, count);
        if *count >= cap {
            break;
        }
    }
    grid[idx] = 0;
}

/// Builds a puzzle with a unique solution. Returns `(puzzle, solution)`.
pub fn generate<R: Rng + ?Sized>(settings: &SudokuSettings, rng: &mut R) -> (Grid, Grid) {
    let mut solution = [0u8; CELLS];
    // An empty grid always completes.
    fill_grid(&mut solution, rng);

    let mut puzzle = solution;
    let target = (CELLS as f64 * settings.fraction.clamp(0.0, 1.0)).floor() as usize;
    let mut order: Vec<usize> = (0..CELLS).collect();
    order.shuffle(rng);

    let mut removed = 0;
    for idx in order {
        if removed >= target {
            break;
        }
        let kept = puzzle[idx];
        puzzle[idx] = 0;
        if count_solutions(&puzzle, 2) == 1 {
            removed += 1;
        } else {
            puzzle[idx] = kept;
        }
    }
    debug!("sudoku generated with {} of {} target cells cleared", removed, target);
    (puzzle, solution)
}

/// Result of checking the board against the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Filled cells that disagree with the solution.
    pub errors: usize,
    pub filled: usize,
    pub solved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuState {
    puzzle: Vec<u8>,
    solution: Vec<u8>,
    board: Vec<u8>,
    checks: u32,
}

impl fmt::Display for SudokuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..SIDE {
            if r > 0 && r % BOX == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for c in 0..SIDE {
                if c > 0 && c % BOX == 0 {
                    write!(f, "| ")?;
                }
                match self.board[r * SIDE + c] {
                    0 => write!(f, ". ")?,
                    d => write!(f, "{} ", d)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl SudokuState {
    pub fn generate<R: Rng + ?Sized>(settings: &SudokuSettings, rng: &mut R) -> Self {
        let (puzzle, solution) = generate(settings, rng);
        Self::from_grids(puzzle, solution)
    }

    pub fn from_grids(puzzle: Grid, solution: Grid) -> Self {
        Self {
            puzzle: puzzle.to_vec(),
            solution: solution.to_vec(),
            board: puzzle.to_vec(),
            checks: 0,
        }
    }

    pub fn board(&self) -> &[u8] {
        &self.board
    }

    pub fn solution(&self) -> &[u8] {
        &self.solution
    }

    pub fn is_given(&self, idx: usize) -> bool {
        self.puzzle.get(idx).is_some_and(|&d| d != 0)
    }

    pub fn checks(&self) -> u32 {
        self.checks
    }

    /// Cells the player may write to.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| !self.is_given(i)).collect()
    }

    /// Applies a palette entry at `idx` and returns the cell's new value.
    pub fn enter(&mut self, idx: usize, digit: u8) -> Result<u8, MoveValidationError> {
        if idx >= CELLS {
            return Err(MoveValidationError::invalid(format!("cell {} is off the grid", idx)));
        }
        if digit > SIDE as u8 {
            return Err(MoveValidationError::invalid(format!("{} is not a digit from 0 to 9", digit)));
        }
        if self.is_given(idx) {
            return Err(MoveValidationError::illegal(format!("cell {} is a given", idx)));
        }
        let value = if self.board[idx] == digit { 0 } else { digit };
        self.board[idx] = value;
        Ok(value)
    }

    pub fn is_solved(&self) -> bool {
        self.board == self.solution
    }

    pub fn check(&mut self) -> CheckReport {
        self.checks += 1;
        let filled = self.board.iter().filter(|&&d| d != 0).count();
        let errors = self
            .board
            .iter()
            .zip(&self.solution)
            .filter(|&(&d, &s)| d != 0 && d != s)
            .count();
        CheckReport { errors, filled, solved: self.is_solved() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn assert_valid_solution(grid: &[u8]) {
        for idx in 0..CELLS {
            let mut g = [0u8; CELLS];
            g.copy_from_slice(grid);
            assert!(grid[idx] >= 1 && grid[idx] <= 9);
            assert!(is_valid_placement(&g, idx, grid[idx]), "conflict at {}", idx);
        }
    }

    #[test]
    fn test_fill_produces_valid_grid() {
        let mut rng = crate::GameRng::seed_from_u64(1);
        let mut grid = [0u8; CELLS];
        assert!(fill_grid(&mut grid, &mut rng));
        assert_valid_solution(&grid);
    }

    #[test]
    fn test_generated_puzzle_is_unique_and_consistent() {
        let mut rng = crate::GameRng::seed_from_u64(2);
        let (puzzle, solution) = generate(&SudokuSettings::default(), &mut rng);
        assert_eq!(count_solutions(&puzzle, 2), 1);
        assert_valid_solution(&solution);
        for idx in 0..CELLS {
            assert!(puzzle[idx] == 0 || puzzle[idx] == solution[idx]);
        }
        let cleared = puzzle.iter().filter(|&&d| d == 0).count();
        assert!(cleared > 0 && cleared <= 52);
    }

    #[test]
    fn test_count_solutions_detects_ambiguity() {
        let mut rng = crate::GameRng::seed_from_u64(3);
        let mut grid = [0u8; CELLS];
        fill_grid(&mut grid, &mut rng);
        assert_eq!(count_solutions(&grid, 2), 1);
        assert_eq!(count_solutions(&[0u8; CELLS], 2), 2);
    }

    #[test]
    fn test_palette_rules() {
        let mut rng = crate::GameRng::seed_from_u64(4);
        let mut game = SudokuState::generate(&SudokuSettings::default(), &mut rng);
        let given = (0..CELLS).find(|&i| game.is_given(i)).unwrap();
        let open = (0..CELLS).find(|&i| !game.is_given(i)).unwrap();

        assert!(matches!(game.enter(given, 5), Err(MoveValidationError::IllegalMove(_))));
        assert!(matches!(game.enter(open, 10), Err(MoveValidationError::InvalidInput(_))));
        assert!(matches!(game.enter(81, 1), Err(MoveValidationError::InvalidInput(_))));

        assert_eq!(game.enter(open, 7), Ok(7));
        assert_eq!(game.enter(open, 7), Ok(0));
        assert_eq!(game.enter(open, 3), Ok(3));
        assert_eq!(game.enter(open, 0), Ok(0));
    }

    #[test]
    fn test_check_reports_errors_and_solution() {
        let mut rng = crate::GameRng::seed_from_u64(5);
        let mut game = SudokuState::generate(&SudokuSettings::default(), &mut rng);
        let open: Vec<usize> = game.legal_moves();
        let wrong = open[0];
        let right = game.solution()[wrong];
        let bad = if right == 9 { 1 } else { right + 1 };
        game.enter(wrong, bad).unwrap();
        let report = game.check();
        assert_eq!(report.errors, 1);
        assert!(!report.solved);
        assert_eq!(game.checks(), 1);

        for idx in open {
            let digit = game.solution()[idx];
            if game.board()[idx] != digit {
                game.enter(idx, digit).unwrap();
            }
        }
        let report = game.check();
        assert_eq!(report, CheckReport { errors: 0, filled: CELLS, solved: true });
        assert_eq!(game.checks(), 2);
    }
}
