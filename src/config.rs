//! Game selection and tunables.
//!
//! Everything here is plain serde data so a whole setup can live in a JSON
//! file (`play --config setup.json`); missing fields fall back to defaults.

use crate::games::connect4::Connect4Ai;
use crate::games::dots_and_boxes::DotsAndBoxesAi;
use crate::games::lights_out::LightsOutSettings;
use crate::games::mancala::MancalaAi;
use crate::games::memory::DEFAULT_PAIRS;
use crate::games::othello::OthelloAi;
use crate::games::sudoku::SudokuSettings;
use crate::games::tictactoe::TicTacToeAi;
use crate::{Difficulty, Player};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every game in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    #[default]
    TicTacToe,
    Connect4,
    Othello,
    Mancala,
    Nim,
    DotsAndBoxes,
    LightsOut,
    Memory,
    Sudoku,
    Rps,
    Simon,
}

impl GameKind {
    pub const ALL: [GameKind; 11] = [
        GameKind::TicTacToe,
        GameKind::Connect4,
        GameKind::Othello,
        GameKind::Mancala,
        GameKind::Nim,
        GameKind::DotsAndBoxes,
        GameKind::LightsOut,
        GameKind::Memory,
        GameKind::Sudoku,
        GameKind::Rps,
        GameKind::Simon,
    ];

    /// Games played against the computer on a shared board.
    pub fn is_two_player(self) -> bool {
        matches!(
            self,
            GameKind::TicTacToe
                | GameKind::Connect4
                | GameKind::Othello
                | GameKind::Mancala
                | GameKind::Nim
                | GameKind::DotsAndBoxes
        )
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameKind::TicTacToe => "tic-tac-toe",
            GameKind::Connect4 => "connect4",
            GameKind::Othello => "othello",
            GameKind::Mancala => "mancala",
            GameKind::Nim => "nim",
            GameKind::DotsAndBoxes => "dots-and-boxes",
            GameKind::LightsOut => "lights-out",
            GameKind::Memory => "memory",
            GameKind::Sudoku => "sudoku",
            GameKind::Rps => "rps",
            GameKind::Simon => "simon",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "tictactoe" | "ttt" => Ok(GameKind::TicTacToe),
            "connect4" | "connectfour" => Ok(GameKind::Connect4),
            "othello" | "reversi" => Ok(GameKind::Othello),
            "mancala" | "kalah" => Ok(GameKind::Mancala),
            "nim" => Ok(GameKind::Nim),
            "dotsandboxes" | "dots" => Ok(GameKind::DotsAndBoxes),
            "lightsout" => Ok(GameKind::LightsOut),
            "memory" => Ok(GameKind::Memory),
            "sudoku" => Ok(GameKind::Sudoku),
            "rps" | "rockpaperscissors" => Ok(GameKind::Rps),
            "simon" | "simonsays" => Ok(GameKind::Simon),
            _ => Err(format!("unknown game '{}'", s.trim())),
        }
    }
}

/// Computer player tunables, one block per adversarial game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub tictactoe: TicTacToeAi,
    pub connect4: Connect4Ai,
    pub othello: OthelloAi,
    pub mancala: MancalaAi,
    pub dots_and_boxes: DotsAndBoxesAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleSettings {
    pub lights_out: LightsOutSettings,
    pub sudoku: SudokuSettings,
    pub memory_pairs: usize,
}

impl Default for PuzzleSettings {
    fn default() -> Self {
        Self {
            lights_out: LightsOutSettings::default(),
            sudoku: SudokuSettings::default(),
            memory_pairs: DEFAULT_PAIRS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game: GameKind,
    pub difficulty: Difficulty,
    /// Side the human plays in two-player games; the computer takes the other.
    pub human_side: Player,
    /// Fixes every random choice when set.
    pub seed: Option<u64>,
    /// Pause before a computer move is committed, in milliseconds.
    pub think_delay_ms: u64,
    pub ai: AiSettings,
    pub puzzles: PuzzleSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game: GameKind::default(),
            difficulty: Difficulty::default(),
            human_side: Player::One,
            seed: None,
            think_delay_ms: 500,
            ai: AiSettings::default(),
            puzzles: PuzzleSettings::default(),
        }
    }
}

impl GameConfig {
    pub fn new(game: GameKind, difficulty: Difficulty) -> Self {
        Self {
            game,
            difficulty,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_human_side(mut self, side: Player) -> Self {
        self.human_side = side;
        self
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_kind_names_round_trip() {
        for kind in GameKind::ALL {
            assert_eq!(kind.to_string().parse::<GameKind>(), Ok(kind));
        }
        assert_eq!("Connect Four".parse::<GameKind>(), Ok(GameKind::Connect4));
        assert!("chess".parse::<GameKind>().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "game": "othello", "difficulty": "hard", "ai": { "othello": { "search_depth": 2 } } }"#).unwrap();
        assert_eq!(config.game, GameKind::Othello);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.ai.othello.search_depth, 2);
        assert_eq!(config.ai.othello.mobility_weight, 5);
        assert_eq!(config.ai.mancala, MancalaAi::default());
        assert_eq!(config.human_side, Player::One);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::new(GameKind::Mancala, Difficulty::Hard).with_seed(9).with_human_side(Player::Two);
        let text = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn test_two_player_split() {
        assert_eq!(GameKind::ALL.iter().filter(|k| k.is_two_player()).count(), 6);
    }
}
