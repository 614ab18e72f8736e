//! # Memory (Concentration)
//!
//! Thirty-six face-down cards holding eighteen pairs. A turn flips two cards:
//! a matching pair stays face up, anything else turns back over. Each second
//! flip counts as one move and the game is won when every pair is matched.

use crate::MoveValidationError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PAIRS: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Down,
    Up,
    Matched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub symbol: char,
    pub face: CardFace,
}

/// What a flip revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of the turn is now face up.
    FirstCard { symbol: char },
    /// Both cards stay up.
    Match { first: usize, second: usize, symbol: char },
    /// Both cards were shown and are face down again.
    Mismatch { first: usize, second: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryState {
    cards: Vec<Card>,
    /// Index of the card flipped first this turn.
    pending: Option<usize>,
    moves: u32,
    matched_pairs: usize,
}

impl fmt::Display for MemoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cards.len() as f64).sqrt().ceil().max(1.0) as usize;
        for (i, card) in self.cards.iter().enumerate() {
            match card.face {
                CardFace::Down => write!(f, " {:>2}", i)?,
                CardFace::Up => write!(f, " [{}]", card.symbol)?,
                CardFace::Matched => write!(f, "  {}", card.symbol)?,
            }
            if (i + 1) % width == 0 {
                writeln!(f)?;
            }
        }
        writeln!(f, "Moves: {}  Pairs: {}/{}", self.moves, self.matched_pairs, self.pair_count())
    }
}

impl MemoryState {
    /// A shuffled deck of `pairs` pairs, symbols drawn from `A..`.
    pub fn shuffled<R: Rng + ?Sized>(pairs: usize, rng: &mut R) -> Self {
        let mut deck: Vec<char> = (0..pairs as u32)
            .filter_map(|i| char::from_u32('A' as u32 + i))
            .flat_map(|s| [s, s])
            .collect();
        deck.shuffle(rng);
        Self::from_symbols(deck)
    }

    /// A deck in the given order; used for puzzles and tests.
    pub fn from_symbols(symbols: Vec<char>) -> Self {
        Self {
            cards: symbols
                .into_iter()
                .map(|symbol| Card { symbol, face: CardFace::Down })
                .collect(),
            pending: None,
            moves: 0,
            matched_pairs: 0,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn is_solved(&self) -> bool {
        self.matched_pairs == self.pair_count()
    }

    /// Face-down cards other than the one already turned this turn.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cards.len())
            .filter(|&i| self.cards[i].face == CardFace::Down)
            .collect()
    }

    pub fn flip(&mut self, index: usize) -> Result<FlipOutcome, MoveValidationError> {
        if self.is_solved() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        let Some(card) = self.cards.get(index).copied() else {
            return Err(MoveValidationError::illegal(format!("there is no card {}", index)));
        };
        match card.face {
            CardFace::Matched => return Err(MoveValidationError::illegal(format!("card {} is already matched", index))),
            CardFace::Up => return Err(MoveValidationError::illegal(format!("card {} is already face up", index))),
            CardFace::Down => {}
        }

        let Some(first) = self.pending.take() else {
            self.cards[index].face = CardFace::Up;
            self.pending = Some(index);
            return Ok(FlipOutcome::FirstCard { symbol: card.symbol });
        };

        self.moves += 1;
        if self.cards[first].symbol == card.symbol {
            self.cards[first].face = CardFace::Matched;
            self.cards[index].face = CardFace::Matched;
            self.matched_pairs += 1;
            Ok(FlipOutcome::Match { first, second: index, symbol: card.symbol })
        } else {
            self.cards[first].face = CardFace::Down;
            Ok(FlipOutcome::Mismatch { first, second: index })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn small() -> MemoryState {
        MemoryState::from_symbols(vec!['A', 'B', 'A', 'B'])
    }

    #[test]
    fn test_deck_has_every_symbol_twice() {
        let mut rng = crate::GameRng::seed_from_u64(10);
        let game = MemoryState::shuffled(DEFAULT_PAIRS, &mut rng);
        assert_eq!(game.cards().len(), 36);
        for card in game.cards() {
            assert_eq!(game.cards().iter().filter(|c| c.symbol == card.symbol).count(), 2);
        }
    }

    #[test]
    fn test_match_and_mismatch() {
        let mut game = small();
        assert_eq!(game.flip(0), Ok(FlipOutcome::FirstCard { symbol: 'A' }));
        assert_eq!(game.flip(1), Ok(FlipOutcome::Mismatch { first: 0, second: 1 }));
        assert!(game.cards().iter().all(|c| c.face == CardFace::Down));
        assert_eq!(game.moves(), 1);

        game.flip(0).unwrap();
        assert_eq!(game.flip(2), Ok(FlipOutcome::Match { first: 0, second: 2, symbol: 'A' }));
        assert_eq!(game.matched_pairs(), 1);
        assert_eq!(game.legal_moves(), vec![1, 3]);
    }

    #[test]
    fn test_same_card_and_matched_card_rejected() {
        let mut game = small();
        game.flip(0).unwrap();
        assert!(matches!(game.flip(0), Err(MoveValidationError::IllegalMove(_))));
        game.flip(2).unwrap();
        assert!(matches!(game.flip(2), Err(MoveValidationError::IllegalMove(_))));
        assert!(matches!(game.flip(9), Err(MoveValidationError::IllegalMove(_))));
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_solved_after_all_pairs() {
        let mut game = small();
        for (a, b) in [(0, 2), (1, 3)] {
            game.flip(a).unwrap();
            game.flip(b).unwrap();
        }
        assert!(game.is_solved());
        assert_eq!(game.moves(), 2);
        assert_eq!(game.flip(0), Err(MoveValidationError::GameAlreadyOver));
    }
}
