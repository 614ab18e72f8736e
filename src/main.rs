//! # Mini Games Arena
//!
//! Terminal front end. Pick a game on the command line or from the menu, then
//! play it against the computer (two-player boards) or solo (puzzles).
//!
//! ## Usage
//! ```text
//! play --game othello --difficulty hard --second
//! play --config setup.json --seed 42
//! RUST_LOG=debug play -g mancala
//! ```

mod cli;

use anyhow::{Context, Result};
use arena::config::{GameConfig, GameKind};
use arena::{seeded_rng, Difficulty, Player};
use clap::Parser;
use cli::Console;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game to play; a menu is shown when omitted
    #[arg(short, long)]
    game: Option<GameKind>,

    /// Computer strength: easy or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Let the computer move first
    #[arg(long, action = clap::ArgAction::SetTrue)]
    second: bool,

    /// Seed for every random choice (shuffles, scrambles, computer moves)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file; command line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pause before the computer moves, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print a JSON snapshot of the state after every move
    #[arg(long, action = clap::ArgAction::SetTrue)]
    json: bool,
}

impl Args {
    fn into_config(self) -> Result<(GameConfig, bool, bool)> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                GameConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))?
            }
            None => GameConfig::default(),
        };
        let chosen = self.game.is_some() || self.config.is_some();
        if let Some(game) = self.game {
            config.game = game;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if self.second {
            config.human_side = Player::Two;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(delay) = self.delay_ms {
            config.think_delay_ms = delay;
        }
        Ok((config, chosen, self.json))
    }
}

async fn pick_game(console: &mut Console) -> Result<Option<GameKind>> {
    println!("{}", "Mini Games Arena".bold().underline());
    for (i, kind) in GameKind::ALL.iter().enumerate() {
        let tag = if kind.is_two_player() { "vs computer" } else { "solo" };
        println!("{:>3}. {:<16} {}", i + 1, kind.to_string(), tag.dimmed());
    }
    loop {
        let Some(input) = console.prompt("Choose a game>").await? else {
            return Ok(None);
        };
        if cli::is_quit(&input) {
            return Ok(None);
        }
        let by_number = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| GameKind::ALL.get(i).copied());
        match by_number.map(Ok).unwrap_or_else(|| input.parse::<GameKind>()) {
            Ok(kind) => return Ok(Some(kind)),
            Err(err) => cli::report_error(err),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let (mut config, chosen, json) = Args::parse().into_config()?;
    let mut console = Console::new();

    if !chosen {
        match pick_game(&mut console).await? {
            Some(kind) => config.game = kind,
            None => return Ok(()),
        }
    }
    log::info!("starting {} with seed {:?}", config.game, config.seed);

    if config.game.is_two_player() {
        return cli::duel::run(&mut console, config, json).await;
    }

    let mut rng = seeded_rng(config.seed);
    match config.game {
        GameKind::LightsOut => cli::puzzles::lights_out(&mut console, &config, &mut rng).await,
        GameKind::Memory => cli::puzzles::memory(&mut console, &config, &mut rng).await,
        GameKind::Sudoku => cli::puzzles::sudoku(&mut console, &config, &mut rng).await,
        GameKind::Rps => cli::puzzles::rps(&mut console, &config, &mut rng).await,
        GameKind::Simon => cli::puzzles::simon(&mut console, &config, &mut rng).await,
        other => anyhow::bail!("{} has no solo mode", other),
    }
}
