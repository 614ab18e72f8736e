//! Solo games: Lights Out, Memory, Sudoku, Rock-Paper-Scissors and Simon.

use super::{is_quit, report_error, Console};
use anyhow::Result;
use arena::config::GameConfig;
use arena::games::lights_out::{LightsOutMove, LightsOutState};
use arena::games::memory::{FlipOutcome, MemoryState};
use arena::games::rps::{Hand, RoundOutcome, RpsState};
use arena::games::simon::{Color, PressOutcome, SimonState};
use arena::games::sudoku::{SudokuState, SIDE};
use arena::GameRng;
use colored::Colorize;
use log::info;
use std::time::Duration;

pub async fn lights_out(console: &mut Console, config: &GameConfig, rng: &mut GameRng) -> Result<()> {
    let mut state = LightsOutState::scrambled(&config.puzzles.lights_out, rng);
    loop {
        println!("\n{}", state);
        if state.is_solved() {
            info!("lights out solved in {} presses", state.moves());
            println!("{}", format!("All lights off in {} presses!", state.moves()).green().bold());
            return Ok(());
        }
        let Some(input) = console.prompt(&format!("{} lit, press row,col>", state.lit_count())).await? else {
            return Ok(());
        };
        if is_quit(&input) {
            return Ok(());
        }
        match input.parse::<LightsOutMove>() {
            Ok(mv) => {
                if let Err(err) = state.press(mv) {
                    report_error(err);
                }
            }
            Err(err) => report_error(err),
        }
    }
}

pub async fn memory(console: &mut Console, config: &GameConfig, rng: &mut GameRng) -> Result<()> {
    let mut state = MemoryState::shuffled(config.puzzles.memory_pairs, rng);
    let reveal = Duration::from_millis(config.think_delay_ms);
    loop {
        println!("\n{}", state);
        if state.is_solved() {
            info!("memory cleared in {} moves", state.moves());
            println!("{}", format!("All pairs found in {} moves!", state.moves()).green().bold());
            return Ok(());
        }
        let text = format!("{}/{} pairs, flip card>", state.matched_pairs(), state.pair_count());
        let Some(input) = console.prompt(&text).await? else {
            return Ok(());
        };
        if is_quit(&input) {
            return Ok(());
        }
        let Ok(index) = input.parse::<usize>() else {
            report_error(format!("'{}' is not a card number", input));
            continue;
        };
        match state.flip(index) {
            Ok(FlipOutcome::FirstCard { symbol }) => println!("Card {} is {}", index, symbol.to_string().cyan()),
            Ok(FlipOutcome::Match { symbol, .. }) => println!("{}", format!("Match: {}", symbol).green()),
            Ok(FlipOutcome::Mismatch { first, second }) => {
                let cards = state.cards();
                println!(
                    "{} and {} don't match",
                    cards[first].symbol.to_string().cyan(),
                    cards[second].symbol.to_string().cyan()
                );
                tokio::time::sleep(reveal).await;
            }
            Err(err) => report_error(err),
        }
    }
}

pub async fn sudoku(console: &mut Console, config: &GameConfig, rng: &mut GameRng) -> Result<()> {
    let mut state = SudokuState::generate(&config.puzzles.sudoku, rng);
    loop {
        println!("\n{}", state);
        let Some(input) = console.prompt("row,col,digit (0 clears), 'check' or 'quit'>").await? else {
            return Ok(());
        };
        if is_quit(&input) {
            return Ok(());
        }
        if input.eq_ignore_ascii_case("check") {
            let report = state.check();
            if report.solved {
                info!("sudoku solved after {} checks", state.checks());
                println!("{}", "Solved!".green().bold());
                return Ok(());
            }
            println!(
                "{} cells filled, {}",
                report.filled,
                if report.errors == 0 {
                    "no mistakes so far".green()
                } else {
                    format!("{} wrong", report.errors).red()
                }
            );
            continue;
        }
        let parts: Result<Vec<usize>, _> = input.split(',').map(|p| p.trim().parse::<usize>()).collect();
        match parts.as_deref() {
            Ok(&[row, col, digit]) if row < SIDE && col < SIDE && digit <= SIDE => {
                if let Err(err) = state.enter(row * SIDE + col, digit as u8) {
                    report_error(err);
                }
            }
            _ => report_error("Expected format: row,col,digit with row and col 0-8 and digit 0-9"),
        }
    }
}

pub async fn rps(console: &mut Console, _config: &GameConfig, rng: &mut GameRng) -> Result<()> {
    let mut state = RpsState::new();
    loop {
        let Some(input) = console.prompt("rock, paper or scissors>").await? else {
            break;
        };
        if is_quit(&input) {
            break;
        }
        let hand = match input.parse::<Hand>() {
            Ok(hand) => hand,
            Err(err) => {
                report_error(err);
                continue;
            }
        };
        let round = state.play_round(hand, rng);
        let verdict = match round.outcome {
            RoundOutcome::HumanWins => "you win".green(),
            RoundOutcome::ComputerWins => "computer wins".red(),
            RoundOutcome::Draw => "draw".yellow(),
        };
        let (human, computer) = state.scores();
        println!(
            "{} vs {}: {}   (you {} - {} computer, {} draws)",
            round.human,
            round.computer,
            verdict,
            human,
            computer,
            state.draws()
        );
    }
    let (human, computer) = state.scores();
    info!("rps finished after {} rounds: {} - {}", state.rounds(), human, computer);
    Ok(())
}

pub async fn simon(console: &mut Console, config: &GameConfig, rng: &mut GameRng) -> Result<()> {
    let mut state = SimonState::new();
    let show = Duration::from_millis(config.think_delay_ms);
    loop {
        state.next_round(rng)?;
        let sequence: Vec<String> = state.sequence().iter().map(|c| c.to_string()).collect();
        println!("\nLevel {}: {}", state.level(), sequence.join(" ").cyan());
        tokio::time::sleep(show).await;

        while state.awaiting_input() {
            let Some(input) = console.prompt("repeat the colours>").await? else {
                return Ok(());
            };
            if is_quit(&input) {
                return Ok(());
            }
            for word in input.split_whitespace() {
                let color = match word.parse::<Color>() {
                    Ok(color) => color,
                    Err(err) => {
                        report_error(err);
                        break;
                    }
                };
                match state.press(color)? {
                    PressOutcome::Correct => {}
                    PressOutcome::RoundComplete { level } => {
                        println!("{}", format!("Level {} complete", level).green());
                        break;
                    }
                    PressOutcome::Wrong { expected, level } => {
                        info!("simon ended at level {}", level);
                        println!(
                            "{}",
                            format!("Wrong! Expected {}. You reached level {}.", expected, level).red().bold()
                        );
                        return Ok(());
                    }
                }
            }
        }
    }
}
