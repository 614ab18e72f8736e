//! # Simon Says
//!
//! Each round appends one random colour to the sequence and the player must
//! repeat the whole sequence. A wrong press ends the game at the current level.

use crate::MoveValidationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Green,
    Red,
    Yellow,
    Blue,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Green, Color::Red, Color::Yellow, Color::Blue];
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" | "green" => Ok(Color::Green),
            "r" | "red" => Ok(Color::Red),
            "y" | "yellow" => Ok(Color::Yellow),
            "b" | "blue" => Ok(Color::Blue),
            other => Err(format!("unknown colour '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Right colour, more of the sequence to go.
    Correct,
    /// The whole sequence was repeated; call `next_round`.
    RoundComplete { level: usize },
    /// Wrong colour; the game is over.
    Wrong { expected: Color, level: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimonState {
    sequence: Vec<Color>,
    /// How much of the sequence has been echoed this round.
    echoed: usize,
    over: bool,
}

impl SimonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level, the length of the sequence.
    pub fn level(&self) -> usize {
        self.sequence.len()
    }

    pub fn sequence(&self) -> &[Color] {
        &self.sequence
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// True while the player still owes presses for this round.
    pub fn awaiting_input(&self) -> bool {
        !self.over && self.echoed < self.sequence.len()
    }

    /// Appends a random colour and starts the next round.
    pub fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Color, MoveValidationError> {
        if self.over {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if self.awaiting_input() {
            return Err(MoveValidationError::illegal("the current sequence is not finished"));
        }
        let color = Color::ALL[rng.random_range(0..Color::ALL.len())];
        self.sequence.push(color);
        self.echoed = 0;
        Ok(color)
    }

    pub fn press(&mut self, color: Color) -> Result<PressOutcome, MoveValidationError> {
        if self.over {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        let Some(&expected) = self.sequence.get(self.echoed) else {
            return Err(MoveValidationError::illegal("wait for the next sequence"));
        };
        if color != expected {
            self.over = true;
            return Ok(PressOutcome::Wrong { expected, level: self.level() });
        }
        self.echoed += 1;
        if self.echoed == self.sequence.len() {
            Ok(PressOutcome::RoundComplete { level: self.level() })
        } else {
            Ok(PressOutcome::Correct)
        }
    }
}
