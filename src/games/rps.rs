//! # Rock-Paper-Scissors
//!
//! Rounds against a computer that plays randomly for the first few rounds and
//! then tries to read the human: it looks at what the human played right
//! after their previous choice in earlier rounds, assumes the most frequent
//! follow-up, and plays whatever beats it. The computer commits to its choice
//! before seeing the human's hand for the current round.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rounds played at random before the predictor kicks in.
pub const WARMUP_ROUNDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Paper, Hand::Scissors];

    /// The hand this one defeats.
    pub fn beats(self) -> Hand {
        match self {
            Hand::Rock => Hand::Scissors,
            Hand::Paper => Hand::Rock,
            Hand::Scissors => Hand::Paper,
        }
    }

    /// The hand that defeats this one.
    pub fn counter(self) -> Hand {
        match self {
            Hand::Rock => Hand::Paper,
            Hand::Paper => Hand::Scissors,
            Hand::Scissors => Hand::Rock,
        }
    }

    fn index(self) -> usize {
        match self {
            Hand::Rock => 0,
            Hand::Paper => 1,
            Hand::Scissors => 2,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hand::Rock => write!(f, "rock"),
            Hand::Paper => write!(f, "paper"),
            Hand::Scissors => write!(f, "scissors"),
        }
    }
}

impl FromStr for Hand {
    type Err = String;

    /// Accepts the full name or its first letter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "rock" => Ok(Hand::Rock),
            "p" | "paper" => Ok(Hand::Paper),
            "s" | "scissors" => Ok(Hand::Scissors),
            other => Err(format!("'{}' is not rock, paper or scissors", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    HumanWins,
    ComputerWins,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub human: Hand,
    pub computer: Hand,
    pub outcome: RoundOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsState {
    human_score: u32,
    computer_score: u32,
    draws: u32,
    history: Vec<Hand>,
}

impl RpsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.human_score, self.computer_score)
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn rounds(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[Hand] {
        &self.history
    }

    /// The human's most likely next hand, if earlier rounds show a pattern.
    pub fn predict(&self) -> Option<Hand> {
        let last = *self.history.last()?;
        let mut counts = [0u32; 3];
        for pair in self.history.windows(2) {
            if pair[0] == last {
                counts[pair[1].index()] += 1;
            }
        }
        let mut best: Option<(Hand, u32)> = None;
        for hand in Hand::ALL {
            let n = counts[hand.index()];
            if n > 0 && best.map_or(true, |(_, m)| n > m) {
                best = Some((hand, n));
            }
        }
        best.map(|(hand, _)| hand)
    }

    /// The computer's hand for the coming round.
    pub fn computer_choice<R: Rng + ?Sized>(&self, rng: &mut R) -> Hand {
        let random = |rng: &mut R| Hand::ALL[rng.random_range(0..Hand::ALL.len())];
        if self.history.len() < WARMUP_ROUNDS {
            return random(rng);
        }
        match self.predict() {
            Some(hand) => hand.counter(),
            None => random(rng),
        }
    }

    /// Scores a round with an already chosen computer hand.
    pub fn record(&mut self, human: Hand, computer: Hand) -> Round {
        self.history.push(human);
        let outcome = if human == computer {
            self.draws += 1;
            RoundOutcome::Draw
        } else if human.beats() == computer {
            self.human_score += 1;
            RoundOutcome::HumanWins
        } else {
            self.computer_score += 1;
            RoundOutcome::ComputerWins
        };
        Round { human, computer, outcome }
    }

    pub fn play_round<R: Rng + ?Sized>(&mut self, human: Hand, rng: &mut R) -> Round {
        let computer = self.computer_choice(rng);
        self.record(human, computer)
    }
}
