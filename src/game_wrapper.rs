//! # Game Wrapper Module - Unified Game Interface
//!
//! Lets the controller, the front ends and the benchmark work with any of the
//! two-player games through one type. Each game keeps its own state and move
//! types; the wrapper enums pair them up and a macro generates the dispatch.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │ GameController  │◄──►│   GameWrapper    │◄──►│  Game-Specific  │
//! │  play / bench   │    │ • Unified API    │    │ Implementations │
//! │                 │    │ • Move parsing   │    │ • TicTacToe     │
//! │                 │    │ • AI dispatch    │    │ • Connect4 ...  │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! Using enums rather than trait objects keeps `Clone` cheap for the search
//! and lets mismatched game/move pairs be rejected with a proper error.

use crate::config::{AiSettings, GameKind};
use crate::games::connect4::{Connect4Move, Connect4State};
use crate::games::dots_and_boxes::{DotsAndBoxesState, Edge};
use crate::games::mancala::{MancalaMove, MancalaState};
use crate::games::nim::{NimAi, NimMove, NimState};
use crate::games::othello::{OthelloMove, OthelloState};
use crate::games::tictactoe::{TicTacToeMove, TicTacToeState};
use crate::{ComputerPlayer, Difficulty, GameState, MoveValidationError, Player, TurnOutcome};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wrapper enum for all two-player game states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameWrapper {
    TicTacToe(TicTacToeState),
    /// Gravity drops, four in a row
    Connect4(Connect4State),
    Othello(OthelloState),
    /// Sowing game; store landings and captures
    Mancala(MancalaState),
    Nim(NimState),
    DotsAndBoxes(DotsAndBoxesState),
}

/// Wrapper enum for all two-player move types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveWrapper {
    TicTacToe(TicTacToeMove),
    Connect4(Connect4Move),
    Othello(OthelloMove),
    Mancala(MancalaMove),
    Nim(NimMove),
    DotsAndBoxes(Edge),
}

impl fmt::Display for MoveWrapper {
    /// Compact notation used in logs and the move history.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveWrapper::TicTacToe(m) => write!(f, "T({})", m.0),
            MoveWrapper::Connect4(m) => write!(f, "C4({})", m.0),
            MoveWrapper::Othello(m) => write!(f, "O({},{})", m.0, m.1),
            MoveWrapper::Mancala(m) => write!(f, "M({})", m.0),
            MoveWrapper::Nim(m) => write!(f, "N({}-{})", m.pile, m.amount),
            MoveWrapper::DotsAndBoxes(e) => write!(f, "D({})", e),
        }
    }
}

impl fmt::Display for GameWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameWrapper::TicTacToe(g) => write!(f, "{}", g),
            GameWrapper::Connect4(g) => write!(f, "{}", g),
            GameWrapper::Othello(g) => write!(f, "{}", g),
            GameWrapper::Mancala(g) => write!(f, "{}", g),
            GameWrapper::Nim(g) => write!(f, "{}", g),
            GameWrapper::DotsAndBoxes(g) => write!(f, "{}", g),
        }
    }
}

macro_rules! impl_game_dispatch {
    ($($variant:ident),*) => {
        impl GameState for GameWrapper {
            type Move = MoveWrapper;

            fn get_possible_moves(&self) -> Vec<Self::Move> {
                match self {
                    $(GameWrapper::$variant(g) => g
                        .get_possible_moves()
                        .into_iter()
                        .map(MoveWrapper::$variant)
                        .collect(),)*
                }
            }

            /// Mismatched pairs are ignored; validated callers go through
            /// [`GameWrapper::apply_move`].
            fn make_move(&mut self, mv: &Self::Move) -> TurnOutcome {
                match (self, mv) {
                    $((GameWrapper::$variant(g), MoveWrapper::$variant(m)) => g.make_move(m),)*
                    _ => TurnOutcome::Alternate,
                }
            }

            fn is_terminal(&self) -> bool {
                match self {
                    $(GameWrapper::$variant(g) => g.is_terminal(),)*
                }
            }

            fn get_winner(&self) -> Option<Player> {
                match self {
                    $(GameWrapper::$variant(g) => g.get_winner(),)*
                }
            }

            fn get_current_player(&self) -> Player {
                match self {
                    $(GameWrapper::$variant(g) => g.get_current_player(),)*
                }
            }
        }

        impl GameWrapper {
            /// Checks if a move is legal in the current game state
            pub fn is_legal(&self, mv: &MoveWrapper) -> bool {
                match (self, mv) {
                    $((GameWrapper::$variant(g), MoveWrapper::$variant(m)) => GameState::is_legal(g, m),)*
                    _ => false,
                }
            }

            /// Legal moves for either side, whether or not it is their turn.
            pub fn legal_moves_for(&self, player: Player) -> Vec<MoveWrapper> {
                match self {
                    $(GameWrapper::$variant(g) => g
                        .legal_moves_for(player)
                        .into_iter()
                        .map(MoveWrapper::$variant)
                        .collect(),)*
                }
            }
        }
    };
}

impl_game_dispatch!(TicTacToe, Connect4, Othello, Mancala, Nim, DotsAndBoxes);

impl GameWrapper {
    /// A fresh game of `kind`, or `None` for the single-player puzzles.
    pub fn new(kind: GameKind) -> Option<Self> {
        let game = match kind {
            GameKind::TicTacToe => GameWrapper::TicTacToe(TicTacToeState::new()),
            GameKind::Connect4 => GameWrapper::Connect4(Connect4State::default()),
            GameKind::Othello => GameWrapper::Othello(OthelloState::new()),
            GameKind::Mancala => GameWrapper::Mancala(MancalaState::new()),
            GameKind::Nim => GameWrapper::Nim(NimState::new()),
            GameKind::DotsAndBoxes => GameWrapper::DotsAndBoxes(DotsAndBoxesState::default()),
            _ => return None,
        };
        Some(game)
    }

    pub fn kind(&self) -> GameKind {
        match self {
            GameWrapper::TicTacToe(_) => GameKind::TicTacToe,
            GameWrapper::Connect4(_) => GameKind::Connect4,
            GameWrapper::Othello(_) => GameKind::Othello,
            GameWrapper::Mancala(_) => GameKind::Mancala,
            GameWrapper::Nim(_) => GameKind::Nim,
            GameWrapper::DotsAndBoxes(_) => GameKind::DotsAndBoxes,
        }
    }

    /// Validated move application; the state is untouched on error.
    pub fn apply_move(&mut self, player: Player, mv: &MoveWrapper) -> Result<TurnOutcome, MoveValidationError> {
        match (self, mv) {
            (GameWrapper::TicTacToe(g), MoveWrapper::TicTacToe(m)) => g.apply_move(player, *m),
            (GameWrapper::Connect4(g), MoveWrapper::Connect4(m)) => g.apply_move(player, *m),
            (GameWrapper::Othello(g), MoveWrapper::Othello(m)) => g.apply_move(player, *m).map(|o| o.turn),
            (GameWrapper::Mancala(g), MoveWrapper::Mancala(m)) => g.apply_move(player, *m).map(|o| o.turn),
            (GameWrapper::Nim(g), MoveWrapper::Nim(m)) => g.apply_move(player, *m),
            (GameWrapper::DotsAndBoxes(g), MoveWrapper::DotsAndBoxes(e)) => g.apply_move(player, *e).map(|o| o.turn),
            _ => Err(MoveValidationError::MismatchedGameType),
        }
    }

    /// Parses text input into this game's move type.
    pub fn parse_move(&self, input: &str) -> Result<MoveWrapper, MoveValidationError> {
        let parsed = match self {
            GameWrapper::TicTacToe(_) => input.parse().map(MoveWrapper::TicTacToe),
            GameWrapper::Connect4(_) => input.parse().map(MoveWrapper::Connect4),
            GameWrapper::Othello(_) => input.parse().map(MoveWrapper::Othello),
            GameWrapper::Mancala(_) => input.parse().map(MoveWrapper::Mancala),
            GameWrapper::Nim(_) => input.parse().map(MoveWrapper::Nim),
            GameWrapper::DotsAndBoxes(_) => input.parse().map(MoveWrapper::DotsAndBoxes),
        };
        parsed.map_err(MoveValidationError::InvalidInput)
    }

    /// Hint shown when asking for a move.
    pub fn move_format(&self) -> &'static str {
        match self {
            GameWrapper::TicTacToe(_) => "cell 0-8",
            GameWrapper::Connect4(_) => "column",
            GameWrapper::Othello(_) => "row,col",
            GameWrapper::Mancala(_) => "pit index",
            GameWrapper::Nim(_) => "pile,amount",
            GameWrapper::DotsAndBoxes(_) => "h-r-c or v-r-c",
        }
    }

    /// Asks the configured computer player of this game for a move.
    pub fn choose_move<R: Rng + ?Sized>(&self, ai: &AiSettings, difficulty: Difficulty, rng: &mut R) -> Option<MoveWrapper> {
        match self {
            GameWrapper::TicTacToe(g) => ai.tictactoe.choose_move(g, difficulty, rng).map(MoveWrapper::TicTacToe),
            GameWrapper::Connect4(g) => ai.connect4.choose_move(g, difficulty, rng).map(MoveWrapper::Connect4),
            GameWrapper::Othello(g) => ai.othello.choose_move(g, difficulty, rng).map(MoveWrapper::Othello),
            GameWrapper::Mancala(g) => ai.mancala.choose_move(g, difficulty, rng).map(MoveWrapper::Mancala),
            GameWrapper::Nim(g) => NimAi.choose_move(g, difficulty, rng).map(MoveWrapper::Nim),
            GameWrapper::DotsAndBoxes(g) => ai.dots_and_boxes.choose_move(g, difficulty, rng).map(MoveWrapper::DotsAndBoxes),
        }
    }

    /// Per-player score line for games that keep one.
    pub fn score_line(&self) -> Option<String> {
        match self {
            GameWrapper::Othello(g) => {
                let (black, white) = g.disc_counts();
                Some(format!("Discs {} - {}", black, white))
            }
            GameWrapper::Mancala(g) => Some(format!("Stores {} - {}", g.store(Player::One), g.store(Player::Two))),
            GameWrapper::DotsAndBoxes(g) => Some(format!("Boxes {} - {}", g.score(Player::One), g.score(Player::Two))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_display() {
        let move_wrapper = MoveWrapper::Othello(OthelloMove(1, 2));
        assert_eq!(format!("{}", move_wrapper), "O(1,2)");
        let edge = MoveWrapper::DotsAndBoxes(Edge::Vertical { row: 0, col: 3 });
        assert_eq!(format!("{}", edge), "D(v-0-3)");

        let game_wrapper = GameWrapper::new(GameKind::Connect4).unwrap();
        let _ = format!("{}", game_wrapper);
    }

    #[test]
    fn test_new_covers_two_player_games_only() {
        for kind in GameKind::ALL {
            let game = GameWrapper::new(kind);
            assert_eq!(game.is_some(), kind.is_two_player());
            if let Some(game) = game {
                assert_eq!(game.kind(), kind);
                assert!(!game.get_possible_moves().is_empty());
            }
        }
    }

    #[test]
    fn test_mismatched_move_rejected() {
        let mut game = GameWrapper::new(GameKind::TicTacToe).unwrap();
        let before = game.clone();
        let err = game.apply_move(Player::One, &MoveWrapper::Connect4(Connect4Move(0)));
        assert_eq!(err, Err(MoveValidationError::MismatchedGameType));
        assert!(!game.is_legal(&MoveWrapper::Connect4(Connect4Move(0))));
        assert_eq!(game, before);
    }

    #[test]
    fn test_parse_move_per_game() {
        let nim = GameWrapper::new(GameKind::Nim).unwrap();
        assert_eq!(nim.parse_move("2,3"), Ok(MoveWrapper::Nim(NimMove { pile: 2, amount: 3 })));
        assert!(matches!(nim.parse_move("two"), Err(MoveValidationError::InvalidInput(_))));

        let dots = GameWrapper::new(GameKind::DotsAndBoxes).unwrap();
        assert_eq!(
            dots.parse_move("h-0-1"),
            Ok(MoveWrapper::DotsAndBoxes(Edge::Horizontal { row: 0, col: 1 }))
        );
    }

    #[test]
    fn test_choose_move_is_legal_for_every_game() {
        let ai = AiSettings::default();
        let mut rng = crate::GameRng::seed_from_u64(21);
        for kind in GameKind::ALL.into_iter().filter(|k| k.is_two_player()) {
            let game = GameWrapper::new(kind).unwrap();
            for difficulty in [Difficulty::Easy, Difficulty::Hard] {
                let mv = game.choose_move(&ai, difficulty, &mut rng).unwrap();
                assert!(game.is_legal(&mv), "{} {:?} chose {}", kind, difficulty, mv);
            }
        }
    }
}
