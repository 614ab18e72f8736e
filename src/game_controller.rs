//! # Game Controller Module - Central Game State Management
//!
//! `GameController` owns the authoritative state of one two-player game and
//! is the only thing that mutates it. It binds each side to a human or the
//! computer, validates every move, keeps the move history and tells
//! subscribers what happened.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       GameController                                │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │              Authoritative Game State                       │    │
//! │  │  • Single source of truth                                   │    │
//! │  │  • All moves validated here before application              │    │
//! │  │  • Move history maintained                                  │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! │                           │                                         │
//! │              ┌────────────┼────────────┐                            │
//! │              ▼            ▼            ▼                            │
//! │  ┌───────────────┐ ┌───────────┐ ┌─────────────────┐                │
//! │  │ Computer      │ │ Snapshots │ │ Event           │                │
//! │  │ (cloned state)│ │ (serde)   │ │ subscribers     │                │
//! │  └───────────────┘ └───────────┘ └─────────────────┘                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected move never changes the state. Once the game is over every
//! further move is refused.

use crate::config::{GameConfig, GameKind};
use crate::game_wrapper::{GameWrapper, MoveWrapper};
use crate::{seeded_rng, Difficulty, GameRng, GameState, GameStatus, MoveValidationError, Player, TurnOutcome};
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::SystemTime;

/// Who is in charge of a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerType {
    Human,
    Computer,
}

/// Result of attempting to apply a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// Move was successfully applied
    Success {
        move_made: MoveWrapper,
        player: Player,
        outcome: TurnOutcome,
        game_over: bool,
        /// Winner if game is over (None for draw)
        winner: Option<Player>,
    },
    /// Move was rejected as invalid
    Invalid { reason: MoveValidationError },
    /// Game is already over, no more moves allowed
    GameOver,
}

/// Notifications sent to every subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was applied to the board.
    StateChanged { move_made: MoveWrapper, player: Player },
    /// `next` is to move; `outcome` says whether the side changed.
    TurnChanged { next: Player, outcome: TurnOutcome },
    GameOver { status: GameStatus },
    MoveRejected { reason: MoveValidationError },
}

/// A single entry in the move history
#[derive(Debug, Clone)]
pub struct MoveHistoryEntry {
    pub timestamp: SystemTime,
    pub player: Player,
    pub move_made: MoveWrapper,
    /// Move number (1-indexed)
    pub move_number: usize,
}

impl MoveHistoryEntry {
    pub fn new(player: Player, move_made: MoveWrapper, move_number: usize) -> Self {
        Self {
            timestamp: SystemTime::now(),
            player,
            move_made,
            move_number,
        }
    }
}

/// Everything a presentation layer needs to draw the game.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub game: GameKind,
    pub state: GameWrapper,
    pub to_move: Player,
    pub status: GameStatus,
    pub difficulty: Difficulty,
    pub seats: [PlayerType; 2],
    pub move_count: usize,
    pub last_move: Option<MoveWrapper>,
}

/// The central game controller that owns the authoritative game state
///
/// # Usage
/// ```
/// use arena::config::{GameConfig, GameKind};
/// use arena::game_controller::{GameController, MoveResult};
/// use arena::Difficulty;
///
/// let config = GameConfig::new(GameKind::TicTacToe, Difficulty::Hard).with_seed(1);
/// let mut controller = GameController::new(config).unwrap();
/// let mv = controller.parse_move("4").unwrap();
/// assert!(matches!(controller.attempt_move(mv), MoveResult::Success { .. }));
/// let reply = controller.request_computer_move().unwrap();
/// assert!(reply.is_some());
/// ```
#[derive(Debug)]
pub struct GameController {
    config: GameConfig,
    /// The authoritative game state
    game_state: GameWrapper,
    seats: [PlayerType; 2],
    rng: GameRng,
    move_history: Vec<MoveHistoryEntry>,
    status: GameStatus,
    subscribers: Vec<Sender<GameEvent>>,
}

impl GameController {
    /// Starts a new game. Fails for the solo puzzles, which have no opponent.
    pub fn new(config: GameConfig) -> Result<Self, MoveValidationError> {
        let game_state = GameWrapper::new(config.game)
            .ok_or_else(|| MoveValidationError::invalid(format!("{} is not a two-player game", config.game)))?;
        let mut seats = [PlayerType::Computer; 2];
        seats[config.human_side.index()] = PlayerType::Human;
        info!(
            "new {} game, {} difficulty, human plays {}",
            config.game, config.difficulty, config.human_side
        );
        Ok(Self {
            rng: seeded_rng(config.seed),
            config,
            game_state,
            seats,
            move_history: Vec::new(),
            status: GameStatus::InProgress,
            subscribers: Vec::new(),
        })
    }

    /// Registers a new listener. Dropped receivers are forgotten on the next event.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seat(&self, player: Player) -> PlayerType {
        self.seats[player.index()]
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.status.is_game_over() && self.seat(self.get_current_player()) == PlayerType::Computer
    }

    pub fn parse_move(&self, input: &str) -> Result<MoveWrapper, MoveValidationError> {
        self.game_state.parse_move(input)
    }

    /// Validate a move without applying it
    pub fn validate_move(&self, mv: &MoveWrapper) -> Result<(), MoveValidationError> {
        if self.status.is_game_over() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        let mut probe = self.game_state.clone();
        probe.apply_move(self.get_current_player(), mv).map(|_| ())
    }

    /// A move from the human side. Rejected when it is the computer's turn.
    pub fn attempt_move(&mut self, mv: MoveWrapper) -> MoveResult {
        if self.status.is_game_over() {
            return MoveResult::GameOver;
        }
        if self.seat(self.get_current_player()) != PlayerType::Human {
            return self.reject(MoveValidationError::NotYourTurn);
        }
        self.commit(mv)
    }

    /// Lets the computer pick and play its move. `Ok(None)` means it had
    /// nothing to play.
    pub fn request_computer_move(&mut self) -> Result<Option<MoveWrapper>, MoveValidationError> {
        if self.status.is_game_over() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if self.seat(self.get_current_player()) != PlayerType::Computer {
            return Err(MoveValidationError::NotYourTurn);
        }
        let Some(mv) = self.game_state.choose_move(&self.config.ai, self.config.difficulty, &mut self.rng) else {
            return Ok(None);
        };
        debug!("computer chose {}", mv);
        match self.commit(mv) {
            MoveResult::Success { .. } => Ok(Some(mv)),
            MoveResult::Invalid { reason } => Err(reason),
            MoveResult::GameOver => Err(MoveValidationError::GameAlreadyOver),
        }
    }

    fn reject(&mut self, reason: MoveValidationError) -> MoveResult {
        warn!("rejected move: {}", reason);
        self.emit(GameEvent::MoveRejected { reason: reason.clone() });
        MoveResult::Invalid { reason }
    }

    fn commit(&mut self, mv: MoveWrapper) -> MoveResult {
        let player = self.get_current_player();
        let outcome = match self.game_state.apply_move(player, &mv) {
            Ok(outcome) => outcome,
            Err(reason) => return self.reject(reason),
        };

        let move_number = self.move_history.len() + 1;
        self.move_history.push(MoveHistoryEntry::new(player, mv, move_number));
        self.emit(GameEvent::StateChanged { move_made: mv, player });

        let game_over = self.game_state.is_terminal();
        let winner = if game_over { self.game_state.get_winner() } else { None };
        if game_over {
            self.status = self.game_state.status();
            info!("{} over after {} moves: {:?}", self.config.game, move_number, self.status);
            self.emit(GameEvent::GameOver { status: self.status });
        } else {
            let next = self.get_current_player();
            self.emit(GameEvent::TurnChanged { next, outcome });
        }

        MoveResult::Success {
            move_made: mv,
            player,
            outcome,
            game_over,
            winner,
        }
    }

    /// Get a reference to the game state for rendering
    pub fn get_render_state(&self) -> &GameWrapper {
        &self.game_state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game: self.config.game,
            state: self.game_state.clone(),
            to_move: self.get_current_player(),
            status: self.status,
            difficulty: self.config.difficulty,
            seats: self.seats,
            move_count: self.move_history.len(),
            last_move: self.move_history.last().map(|e| e.move_made),
        }
    }

    pub fn get_current_player(&self) -> Player {
        self.game_state.get_current_player()
    }

    pub fn get_status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    pub fn get_winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Win(w) => Some(w),
            _ => None,
        }
    }

    pub fn get_move_history(&self) -> &[MoveHistoryEntry] {
        &self.move_history
    }

    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    /// Get legal moves for the current player
    pub fn get_legal_moves(&self) -> Vec<MoveWrapper> {
        if self.status.is_game_over() {
            Vec::new()
        } else {
            self.game_state.get_possible_moves()
        }
    }

    /// Starts over with the same configuration, seats and subscribers.
    pub fn reset(&mut self) {
        if let Some(fresh) = GameWrapper::new(self.config.game) {
            self.game_state = fresh;
        }
        self.move_history.clear();
        self.status = GameStatus::InProgress;
        info!("{} reset", self.config.game);
        let next = self.get_current_player();
        self.emit(GameEvent::TurnChanged { next, outcome: TurnOutcome::Alternate });
    }

    /// Format move history as a printable transcript
    pub fn format_history(&self) -> String {
        if self.move_history.is_empty() {
            return String::from("No moves made yet.");
        }

        let game_name = match &self.game_state {
            GameWrapper::TicTacToe(_) => "Tic-Tac-Toe",
            GameWrapper::Connect4(_) => "Connect 4",
            GameWrapper::Othello(_) => "Othello",
            GameWrapper::Mancala(_) => "Mancala",
            GameWrapper::Nim(_) => "Nim",
            GameWrapper::DotsAndBoxes(_) => "Dots and Boxes",
        };

        let mut output = format!("=== {} Game History ===\n\n", game_name);
        for entry in &self.move_history {
            output.push_str(&format!(
                "{}. {} - {}\n",
                entry.move_number,
                self.get_player_name(entry.player),
                entry.move_made
            ));
        }

        match self.status {
            GameStatus::Win(winner) => {
                output.push_str(&format!("\nResult: {} wins!\n", self.get_player_name(winner)));
            }
            GameStatus::Draw => output.push_str("\nResult: Draw\n"),
            GameStatus::InProgress => {
                output.push_str(&format!(
                    "\n(Game in progress - {} to move)\n",
                    self.get_player_name(self.get_current_player())
                ));
            }
        }
        output
    }

    /// Get a human-readable player name
    pub fn get_player_name(&self, player: Player) -> String {
        match (&self.game_state, player) {
            (GameWrapper::Othello(_), Player::One) => "Black".to_string(),
            (GameWrapper::Othello(_), Player::Two) => "White".to_string(),
            (GameWrapper::TicTacToe(_), Player::One) => "X".to_string(),
            (GameWrapper::TicTacToe(_), Player::Two) => "O".to_string(),
            _ => player.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::TicTacToeMove;

    fn ttt(difficulty: Difficulty) -> GameController {
        GameController::new(GameConfig::new(GameKind::TicTacToe, difficulty).with_seed(3)).unwrap()
    }

    #[test]
    fn test_valid_move() {
        let mut controller = ttt(Difficulty::Easy);
        match controller.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(4))) {
            MoveResult::Success { player, game_over, outcome, .. } => {
                assert_eq!(player, Player::One);
                assert!(!game_over);
                assert_eq!(outcome, TurnOutcome::Alternate);
            }
            other => panic!("Expected successful move, got {:?}", other),
        }
        assert!(controller.is_computer_turn());
    }

    #[test]
    fn test_human_cannot_move_for_computer() {
        let mut controller = ttt(Difficulty::Easy);
        controller.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(4)));
        let before = controller.snapshot().state;
        let result = controller.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(0)));
        assert_eq!(result, MoveResult::Invalid { reason: MoveValidationError::NotYourTurn });
        assert_eq!(controller.snapshot().state, before);
    }

    #[test]
    fn test_invalid_move_occupied() {
        let mut controller = ttt(Difficulty::Easy);
        let rx = controller.subscribe();
        controller.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(4)));
        controller.request_computer_move().unwrap();
        let taken = controller.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(4)));
        assert!(matches!(taken, MoveResult::Invalid { reason: MoveValidationError::IllegalMove(_) }));
        let events: Vec<GameEvent> = rx.try_iter().collect();
        assert!(matches!(events.last(), Some(GameEvent::MoveRejected { .. })));
        assert_eq!(controller.move_count(), 2);
    }

    #[test]
    fn test_computer_refuses_human_turn() {
        let mut controller = ttt(Difficulty::Hard);
        assert_eq!(controller.request_computer_move(), Err(MoveValidationError::NotYourTurn));
    }

    #[test]
    fn test_events_follow_moves() {
        let mut controller = ttt(Difficulty::Hard);
        let rx = controller.subscribe();
        controller.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(0)));
        let events: Vec<GameEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                GameEvent::StateChanged { move_made: MoveWrapper::TicTacToe(TicTacToeMove(0)), player: Player::One },
                GameEvent::TurnChanged { next: Player::Two, outcome: TurnOutcome::Alternate },
            ]
        );
    }

    #[test]
    fn test_full_game_ends_and_locks() {
        let mut controller = ttt(Difficulty::Hard);
        let rx = controller.subscribe();
        while !controller.is_game_over() {
            if controller.is_computer_turn() {
                controller.request_computer_move().unwrap();
            } else {
                let mv = controller.get_legal_moves()[0];
                controller.attempt_move(mv);
            }
        }
        assert_ne!(controller.get_winner(), Some(Player::One));
        assert!(rx.try_iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert_eq!(controller.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(0))), MoveResult::GameOver);
        assert_eq!(controller.request_computer_move(), Err(MoveValidationError::GameAlreadyOver));
        assert!(controller.get_legal_moves().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut controller = ttt(Difficulty::Easy);
        controller.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(4)));
        assert_eq!(controller.move_count(), 1);
        controller.reset();
        assert_eq!(controller.move_count(), 0);
        assert_eq!(controller.get_status(), GameStatus::InProgress);
        assert_eq!(controller.get_current_player(), Player::One);
    }

    #[test]
    fn test_format_history() {
        let mut controller = ttt(Difficulty::Easy);
        controller.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(4)));
        let history = controller.format_history();
        assert!(history.contains("Tic-Tac-Toe Game History"));
        assert!(history.contains("1. X - T(4)"));
        assert!(history.contains("O to move"));
    }

    #[test]
    fn test_puzzles_have_no_controller() {
        let config = GameConfig::new(GameKind::Sudoku, Difficulty::Easy);
        assert!(matches!(GameController::new(config), Err(MoveValidationError::InvalidInput(_))));
    }

    #[test]
    fn test_snapshot_serializes() {
        let controller = ttt(Difficulty::Easy);
        let json = serde_json::to_string(&controller.snapshot()).unwrap();
        assert!(json.contains("\"to_move\":\"One\""));
    }
}
