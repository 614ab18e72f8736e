//! # Dots and Boxes
//!
//! A grid of boxes (3x3 by default, so 4x4 dots). Players take turns drawing
//! one undrawn edge between adjacent dots. Drawing the fourth side of a box
//! claims it; a move that claims one or two boxes earns exactly one extra turn.
//! The game ends when every box is claimed and the larger count wins.
//!
//! Horizontal edge `(r, c)` runs along the top of box `(r, c)`, so rows go up
//! to `rows` inclusive. Vertical edge `(r, c)` runs along the left of box
//! `(r, c)`, so columns go up to `cols` inclusive.

use crate::{ComputerPlayer, Difficulty, GameState, MoveValidationError, Player, TurnOutcome};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BOXES: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Edge {
    Horizontal { row: usize, col: usize },
    Vertical { row: usize, col: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotsAndBoxesState {
    rows: usize,
    cols: usize,
    /// `(rows + 1) * cols`, row-major
    horizontal: Vec<Option<Player>>,
    /// `rows * (cols + 1)`, row-major
    vertical: Vec<Option<Player>>,
    boxes: Vec<Option<Player>>,
    scores: [u32; 2],
    current_player: Player,
    last_move: Option<Edge>,
}

/// Result of a validated edge placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotsOutcome {
    pub boxes_closed: usize,
    pub turn: TurnOutcome,
}

impl Default for DotsAndBoxesState {
    fn default() -> Self {
        Self::new(DEFAULT_BOXES, DEFAULT_BOXES)
    }
}

impl fmt::Display for DotsAndBoxesState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..=self.rows {
            for c in 0..self.cols {
                let line = if self.horizontal[r * self.cols + c].is_some() { "---" } else { "   " };
                write!(f, "+{}", line)?;
            }
            writeln!(f, "+")?;
            if r == self.rows {
                break;
            }
            for c in 0..=self.cols {
                let wall = if self.vertical[r * (self.cols + 1) + c].is_some() { "|" } else { " " };
                write!(f, "{}", wall)?;
                if c < self.cols {
                    let owner = match self.boxes[r * self.cols + c] {
                        Some(Player::One) => " 1 ",
                        Some(Player::Two) => " 2 ",
                        None => "   ",
                    };
                    write!(f, "{}", owner)?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "Score: {} - {}", self.scores[0], self.scores[1])
    }
}

impl GameState for DotsAndBoxesState {
    type Move = Edge;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.undrawn_edges()
    }

    fn make_move(&mut self, mv: &Self::Move) -> TurnOutcome {
        self.draw(*mv).turn
    }

    fn is_terminal(&self) -> bool {
        self.boxes.iter().all(|b| b.is_some())
    }

    fn get_winner(&self) -> Option<Player> {
        if !self.is_terminal() {
            return None;
        }
        let [one, two] = self.scores;
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

impl DotsAndBoxesState {
    /// An empty board of `rows` x `cols` boxes with Player One to move.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            horizontal: vec![None; (rows + 1) * cols],
            vertical: vec![None; rows * (cols + 1)],
            boxes: vec![None; rows * cols],
            scores: [0; 2],
            current_player: Player::One,
            last_move: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn box_owner(&self, row: usize, col: usize) -> Option<Player> {
        self.boxes[row * self.cols + col]
    }

    pub fn last_move(&self) -> Option<Edge> {
        self.last_move
    }

    pub fn is_drawn(&self, edge: Edge) -> bool {
        matches!(self.slot(edge), Some(Some(_)))
    }

    /// Every undrawn edge, horizontals first, each in row-major order.
    pub fn undrawn_edges(&self) -> Vec<Edge> {
        let horizontal = (0..=self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| Edge::Horizontal { row, col }));
        let vertical = (0..self.rows)
            .flat_map(|row| (0..=self.cols).map(move |col| Edge::Vertical { row, col }));
        horizontal
            .chain(vertical)
            .filter(|e| !self.is_drawn(*e))
            .collect()
    }

    /// Edges are shared, so both sides may draw any undrawn edge; only the
    /// side to move is offered them.
    pub fn legal_moves_for(&self, player: Player) -> Vec<Edge> {
        if player == self.current_player {
            self.get_possible_moves()
        } else {
            Vec::new()
        }
    }

    /// The four sides of box `(row, col)`: top, bottom, left, right.
    pub fn box_sides(row: usize, col: usize) -> [Edge; 4] {
        [
            Edge::Horizontal { row, col },
            Edge::Horizontal { row: row + 1, col },
            Edge::Vertical { row, col },
            Edge::Vertical { row, col: col + 1 },
        ]
    }

    pub fn sides_drawn(&self, row: usize, col: usize) -> usize {
        Self::box_sides(row, col).iter().filter(|e| self.is_drawn(**e)).count()
    }

    /// Boxes bordering `edge` (one on the rim, two inside).
    pub fn adjacent_boxes(&self, edge: Edge) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(2);
        match edge {
            Edge::Horizontal { row, col } => {
                if row > 0 {
                    out.push((row - 1, col));
                }
                if row < self.rows {
                    out.push((row, col));
                }
            }
            Edge::Vertical { row, col } => {
                if col > 0 {
                    out.push((row, col - 1));
                }
                if col < self.cols {
                    out.push((row, col));
                }
            }
        }
        out
    }

    /// Validated move application.
    pub fn apply_move(&mut self, player: Player, edge: Edge) -> Result<DotsOutcome, MoveValidationError> {
        if self.is_terminal() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if player != self.current_player {
            return Err(MoveValidationError::NotYourTurn);
        }
        match self.slot(edge) {
            None => Err(MoveValidationError::illegal(format!("{} is not on the board", edge))),
            Some(Some(_)) => Err(MoveValidationError::illegal(format!("{} is already drawn", edge))),
            Some(None) => Ok(self.draw(edge)),
        }
    }

    fn index(&self, edge: Edge) -> Option<(bool, usize)> {
        match edge {
            Edge::Horizontal { row, col } if row <= self.rows && col < self.cols => {
                Some((true, row * self.cols + col))
            }
            Edge::Vertical { row, col } if row < self.rows && col <= self.cols => {
                Some((false, row * (self.cols + 1) + col))
            }
            _ => None,
        }
    }

    /// `None` off the board, `Some(owner)` otherwise.
    fn slot(&self, edge: Edge) -> Option<Option<Player>> {
        self.index(edge).map(|(horizontal, idx)| {
            if horizontal {
                self.horizontal[idx]
            } else {
                self.vertical[idx]
            }
        })
    }

    fn draw(&mut self, edge: Edge) -> DotsOutcome {
        let player = self.current_player;
        if let Some((horizontal, idx)) = self.index(edge) {
            if horizontal {
                self.horizontal[idx] = Some(player);
            } else {
                self.vertical[idx] = Some(player);
            }
        }
        self.last_move = Some(edge);

        let mut boxes_closed = 0;
        for (r, c) in self.adjacent_boxes(edge) {
            if self.boxes[r * self.cols + c].is_none() && self.sides_drawn(r, c) == 4 {
                self.boxes[r * self.cols + c] = Some(player);
                self.scores[player.index()] += 1;
                boxes_closed += 1;
            }
        }

        let turn = if boxes_closed > 0 {
            TurnOutcome::ExtraTurn
        } else {
            self.current_player = player.opponent();
            TurnOutcome::Alternate
        };
        DotsOutcome { boxes_closed, turn }
    }

    /// Undrawn edges that would close at least one box right now.
    pub fn completing_edges(&self) -> Vec<Edge> {
        self.undrawn_edges()
            .into_iter()
            .filter(|e| {
                self.adjacent_boxes(*e)
                    .iter()
                    .any(|&(r, c)| self.box_owner(r, c).is_none() && self.sides_drawn(r, c) == 3)
            })
            .collect()
    }

    /// An edge is safe when no box next to it would be left with three sides.
    pub fn is_safe(&self, edge: Edge) -> bool {
        self.adjacent_boxes(edge)
            .iter()
            .all(|&(r, c)| self.sides_drawn(r, c) != 2)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Horizontal { row, col } => write!(f, "h-{}-{}", row, col),
            Edge::Vertical { row, col } => write!(f, "v-{}-{}", row, col),
        }
    }
}

impl FromStr for Edge {
    type Err = String;

    /// Parses `h-r-c` or `v-r-c`; commas and spaces also separate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|ch: char| ch == '-' || ch == ',' || ch.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 {
            return Err("Expected format: h-r-c or v-r-c".to_string());
        }
        let row = parts[1].parse::<usize>().map_err(|e| e.to_string())?;
        let col = parts[2].parse::<usize>().map_err(|e| e.to_string())?;
        match parts[0].to_ascii_lowercase().as_str() {
            "h" => Ok(Edge::Horizontal { row, col }),
            "v" => Ok(Edge::Vertical { row, col }),
            other => Err(format!("unknown edge orientation '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotsAndBoxesAi {
    /// Chance, per box with three sides, that easy closes it.
    pub easy_take_probability: f64,
}

impl Default for DotsAndBoxesAi {
    fn default() -> Self {
        Self { easy_take_probability: 0.5 }
    }
}

impl ComputerPlayer<DotsAndBoxesState> for DotsAndBoxesAi {
    fn choose_move<R: Rng + ?Sized>(&self, state: &DotsAndBoxesState, difficulty: Difficulty, rng: &mut R) -> Option<Edge> {
        if state.is_terminal() {
            return None;
        }
        let undrawn = state.undrawn_edges();
        match difficulty {
            Difficulty::Easy => {
                let p = self.easy_take_probability.clamp(0.0, 1.0);
                for r in 0..state.rows {
                    for c in 0..state.cols {
                        if state.box_owner(r, c).is_some() || state.sides_drawn(r, c) != 3 {
                            continue;
                        }
                        let missing = DotsAndBoxesState::box_sides(r, c).into_iter().find(|e| !state.is_drawn(*e));
                        if let Some(edge) = missing {
                            if rng.random_bool(p) {
                                return Some(edge);
                            }
                        }
                    }
                }
                undrawn.choose(rng).copied()
            }
            Difficulty::Hard => {
                let completing = state.completing_edges();
                if let Some(edge) = completing.choose(rng) {
                    return Some(*edge);
                }
                let safe: Vec<Edge> = undrawn.iter().copied().filter(|e| state.is_safe(*e)).collect();
                if let Some(edge) = safe.choose(rng) {
                    return Some(*edge);
                }
                undrawn.choose(rng).copied()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn h(row: usize, col: usize) -> Edge {
        Edge::Horizontal { row, col }
    }

    fn v(row: usize, col: usize) -> Edge {
        Edge::Vertical { row, col }
    }

    fn play(game: &mut DotsAndBoxesState, edges: &[Edge]) {
        for e in edges {
            game.make_move(e);
        }
    }

    #[test]
    fn test_edge_counts() {
        let game = DotsAndBoxesState::default();
        assert_eq!(game.get_possible_moves().len(), 24);
        assert_eq!(game.adjacent_boxes(h(0, 0)), vec![(0, 0)]);
        assert_eq!(game.adjacent_boxes(v(1, 1)), vec![(1, 0), (1, 1)]);
    }

    #[test]
    fn test_single_box_claims_and_keeps_turn() {
        let mut game = DotsAndBoxesState::default();
        play(&mut game, &[h(0, 0), h(1, 0), v(0, 0)]);
        assert_eq!(game.get_current_player(), Player::Two);
        let outcome = game.apply_move(Player::Two, v(0, 1)).unwrap();
        assert_eq!(outcome, DotsOutcome { boxes_closed: 1, turn: TurnOutcome::ExtraTurn });
        assert_eq!(game.box_owner(0, 0), Some(Player::Two));
        assert_eq!(game.score(Player::Two), 1);
        assert_eq!(game.get_current_player(), Player::Two);
    }

    #[test]
    fn test_double_box_closure_grants_one_extra_turn() {
        // Boxes (0,0) and (0,1) each miss only the shared edge v(0,1).
        let mut game = DotsAndBoxesState::default();
        play(&mut game, &[h(0, 0), h(1, 0), v(0, 0), h(0, 1), h(1, 1), v(0, 2)]);
        let mover = game.get_current_player();
        let outcome = game.apply_move(mover, v(0, 1)).unwrap();
        assert_eq!(outcome.boxes_closed, 2);
        assert_eq!(outcome.turn, TurnOutcome::ExtraTurn);
        assert_eq!(game.score(mover), 2);
        assert_eq!(game.get_current_player(), mover);
    }

    #[test]
    fn test_rejects_drawn_and_off_board_edges() {
        let mut game = DotsAndBoxesState::default();
        game.apply_move(Player::One, h(0, 0)).unwrap();
        let before = game.clone();
        assert!(matches!(game.apply_move(Player::Two, h(0, 0)), Err(MoveValidationError::IllegalMove(_))));
        assert!(matches!(game.apply_move(Player::Two, v(3, 0)), Err(MoveValidationError::IllegalMove(_))));
        assert!(matches!(game.apply_move(Player::Two, h(0, 3)), Err(MoveValidationError::IllegalMove(_))));
        assert_eq!(game, before);
    }

    #[test]
    fn test_full_game_scores_add_up() {
        let mut rng = crate::GameRng::seed_from_u64(31);
        let mut game = DotsAndBoxesState::default();
        while let Some(edge) = DotsAndBoxesAi::default().choose_move(&game, Difficulty::Easy, &mut rng) {
            game.make_move(&edge);
        }
        assert!(game.is_terminal());
        assert_eq!(game.score(Player::One) + game.score(Player::Two), 9);
        assert!(game.get_possible_moves().is_empty());
    }

    #[test]
    fn test_hard_completes_box() {
        let mut game = DotsAndBoxesState::default();
        play(&mut game, &[h(2, 2), h(3, 2), v(2, 2)]);
        let mut rng = crate::GameRng::seed_from_u64(2);
        let mv = DotsAndBoxesAi::default().choose_move(&game, Difficulty::Hard, &mut rng);
        assert_eq!(mv, Some(v(2, 3)));
    }

    #[test]
    fn test_hard_avoids_giving_away_boxes() {
        let mut game = DotsAndBoxesState::default();
        play(&mut game, &[h(0, 0), v(0, 0)]);
        let mut rng = crate::GameRng::seed_from_u64(9);
        for _ in 0..20 {
            let mv = DotsAndBoxesAi::default().choose_move(&game, Difficulty::Hard, &mut rng).unwrap();
            assert!(game.is_safe(mv));
            assert!(mv != h(1, 0) && mv != v(0, 1));
        }
    }

    #[test]
    fn test_easy_with_certain_take_closes_box() {
        let mut game = DotsAndBoxesState::default();
        play(&mut game, &[h(1, 1), h(2, 1), v(1, 2)]);
        let ai = DotsAndBoxesAi { easy_take_probability: 1.0 };
        let mut rng = crate::GameRng::seed_from_u64(5);
        assert_eq!(ai.choose_move(&game, Difficulty::Easy, &mut rng), Some(v(1, 1)));
    }

    #[test]
    fn test_edge_parsing() {
        assert_eq!("h-3-2".parse::<Edge>(), Ok(h(3, 2)));
        assert_eq!("V 0 1".parse::<Edge>(), Ok(v(0, 1)));
        assert!("x-0-0".parse::<Edge>().is_err());
        assert_eq!(h(1, 2).to_string(), "h-1-2");
    }
}
