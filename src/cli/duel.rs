//! Human against computer on one of the two-player boards.

use super::{is_quit, report_error, Console};
use anyhow::{bail, Result};
use arena::config::GameConfig;
use arena::game_controller::{GameController, GameEvent};
use arena::{GameStatus, TurnOutcome};
use colored::Colorize;
use log::debug;
use std::sync::mpsc::Receiver;
use std::time::Duration;

const HELP: &str = "Commands: a move, 'moves' (legal moves), 'history', 'json' (state snapshot), 'quit'";

pub async fn run(console: &mut Console, config: GameConfig, json: bool) -> Result<()> {
    let delay = Duration::from_millis(config.think_delay_ms);
    let mut controller = GameController::new(config)?;
    let events = controller.subscribe();

    println!("{}", HELP.dimmed());
    render(&controller, json)?;

    while !controller.is_game_over() {
        if controller.is_computer_turn() {
            let name = controller.get_player_name(controller.get_current_player());
            println!("{}", format!("{} (computer) is thinking...", name).dimmed());
            tokio::time::sleep(delay).await;
            if controller.request_computer_move()?.is_none() {
                bail!("computer had no move in a running game");
            }
        } else {
            let hint = controller.get_render_state().move_format();
            let prompt = format!("{} [{}]>", controller.get_player_name(controller.get_current_player()), hint);
            let Some(input) = console.prompt(&prompt).await? else {
                return Ok(());
            };
            match input.to_ascii_lowercase().as_str() {
                "" => continue,
                cmd if is_quit(cmd) => return Ok(()),
                "help" => {
                    println!("{}", HELP);
                    continue;
                }
                "history" => {
                    println!("{}", controller.format_history());
                    continue;
                }
                "moves" => {
                    let moves: Vec<String> = controller.get_legal_moves().iter().map(|m| m.to_string()).collect();
                    println!("{}", moves.join(" "));
                    continue;
                }
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
                    continue;
                }
                _ => match controller.parse_move(&input) {
                    Ok(mv) => {
                        debug!("human submitted {}", mv);
                        controller.attempt_move(mv);
                    }
                    Err(err) => {
                        report_error(err);
                        continue;
                    }
                },
            }
        }
        if drain_events(&events, &controller) {
            render(&controller, json)?;
        }
    }

    println!("\n{}", controller.format_history());
    Ok(())
}

/// Prints what happened since the last call. Returns true if the board changed.
fn drain_events(events: &Receiver<GameEvent>, controller: &GameController) -> bool {
    let mut changed = false;
    for event in events.try_iter() {
        match event {
            GameEvent::StateChanged { move_made, player } => {
                changed = true;
                println!("{} played {}", controller.get_player_name(player), move_made.to_string().cyan());
            }
            GameEvent::TurnChanged { next, outcome } => match outcome {
                TurnOutcome::ExtraTurn => println!("{} goes again", controller.get_player_name(next)),
                TurnOutcome::OpponentPassed => println!(
                    "{} has no move and passes",
                    controller.get_player_name(next.opponent())
                ),
                TurnOutcome::Alternate => {}
            },
            GameEvent::GameOver { status } => {
                let banner = match status {
                    GameStatus::Win(p) => format!("{} wins!", controller.get_player_name(p)),
                    GameStatus::Draw => "It's a draw.".to_string(),
                    GameStatus::InProgress => continue,
                };
                println!("\n{}", banner.green().bold());
            }
            GameEvent::MoveRejected { reason } => report_error(reason),
        }
    }
    changed
}

fn render(controller: &GameController, json: bool) -> Result<()> {
    println!("\n{}", controller.get_render_state());
    if let Some(score) = controller.get_render_state().score_line() {
        println!("{}", score.yellow());
    }
    if json {
        println!("{}", serde_json::to_string(&controller.snapshot())?);
    }
    Ok(())
}
