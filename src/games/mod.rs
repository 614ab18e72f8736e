//! # Game Implementations Module
//!
//! One module per game. Each owns its state type, its move type (with
//! `FromStr` parsing for text input), the rules, and its computer player.
//!
//! ## Two-player games
//! These implement [`crate::GameState`] and [`crate::ComputerPlayer`] and are
//! unified by [`crate::game_wrapper::GameWrapper`]:
//! - **Tic-Tac-Toe**: 3x3, three in a row
//! - **Connect 4**: gravity drops on a 7x6 grid, four in a row
//! - **Othello (Reversi)**: 8x8 piece flipping, passes when blocked
//! - **Mancala (Kalah)**: sowing with extra turns and captures
//! - **Nim**: misère, piles of 3, 5 and 7
//! - **Dots and Boxes**: 3x3 boxes, closing a box earns another turn
//!
//! ## Puzzles and solo games
//! These have a single player (or a computer that only reacts) and expose
//! their own small APIs:
//! - **Lights Out**, **Memory**, **Sudoku**, **Rock-Paper-Scissors**, **Simon Says**
//!
//! ## Adding New Games
//! 1. A move type with `FromStr`
//! 2. A state type implementing `GameState`, plus a validated `apply_move`
//! 3. A computer player implementing `ComputerPlayer`
//! 4. A variant in `GameWrapper` / `MoveWrapper` and in `config::GameKind`

pub mod connect4;
pub mod dots_and_boxes;
pub mod lights_out;
pub mod mancala;
pub mod memory;
pub mod nim;
pub mod othello;
pub mod rps;
pub mod simon;
pub mod sudoku;
pub mod tictactoe;
