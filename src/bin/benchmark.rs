use arena::config::{AiSettings, GameKind};
use arena::game_wrapper::GameWrapper;
use arena::{seeded_rng, Difficulty, GameState, Player};
use clap::Parser;
use log::{debug, info};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about = "Computer vs computer self-play across the two-player games", long_about = None)]
struct Args {
    /// Games to run (default: every two-player game)
    #[arg(short, long, value_delimiter = ',')]
    games: Vec<GameKind>,

    /// Matches per game
    #[arg(short, long, default_value_t = 50)]
    matches: usize,

    /// Difficulty of the side that moves first
    #[arg(long, default_value_t = Difficulty::Hard)]
    first: Difficulty,

    /// Difficulty of the side that moves second
    #[arg(long, default_value_t = Difficulty::Easy)]
    second: Difficulty,

    /// Base seed; match i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads (default: number of CPUs)
    #[arg(long)]
    threads: Option<usize>,

    /// Safety cap on plies per match
    #[arg(long, default_value_t = 500)]
    max_plies: usize,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    unfinished: usize,
    plies: usize,
    elapsed: Duration,
}

enum Finish {
    Won(Player),
    Draw,
    /// Stopped at the ply cap or the mover had nothing to play.
    Unfinished,
}

fn play_match(kind: GameKind, args: &Args, ai: &AiSettings, seed: u64) -> (Finish, usize) {
    let Some(mut game) = GameWrapper::new(kind) else {
        return (Finish::Unfinished, 0);
    };
    let mut rng = seeded_rng(Some(seed));
    let mut plies = 0;
    while !game.is_terminal() {
        if plies >= args.max_plies {
            return (Finish::Unfinished, plies);
        }
        let difficulty = match game.get_current_player() {
            Player::One => args.first,
            Player::Two => args.second,
        };
        let Some(mv) = game.choose_move(ai, difficulty, &mut rng) else {
            return (Finish::Unfinished, plies);
        };
        game.make_move(&mv);
        plies += 1;
    }
    debug!("{} seed {} finished after {} plies", kind, seed, plies);
    match game.get_winner() {
        Some(winner) => (Finish::Won(winner), plies),
        None => (Finish::Draw, plies),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let games: Vec<GameKind> = if args.games.is_empty() {
        GameKind::ALL.into_iter().filter(|k| k.is_two_player()).collect()
    } else {
        args.games.iter().copied().filter(|k| k.is_two_player()).collect()
    };
    let threads = args.threads.unwrap_or_else(num_cpus::get).max(1);

    println!("Mini Games Arena - Self-Play Benchmark");
    println!("======================================");
    println!("Matches per game: {}", args.matches);
    println!("First: {}  Second: {}", args.first, args.second);
    println!("Threads: {}", threads);
    println!("--------------------------------------");

    #[cfg(debug_assertions)]
    println!("WARNING: Running in debug mode. Searches will be much slower.\nUse --release for accurate timings.\n");

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("could not build thread pool: {}", err);
            return;
        }
    };

    let ai = AiSettings::default();
    let tallies: Mutex<BTreeMap<String, Tally>> = Mutex::new(BTreeMap::new());
    let jobs: Vec<(GameKind, u64)> = games
        .iter()
        .flat_map(|&kind| (0..args.matches as u64).map(move |i| (kind, i)))
        .collect();

    let start = Instant::now();
    pool.install(|| {
        jobs.par_iter().for_each(|&(kind, i)| {
            let started = Instant::now();
            let (result, plies) = play_match(kind, &args, &ai, args.seed.wrapping_add(i));
            let elapsed = started.elapsed();

            let mut tallies = tallies.lock();
            let tally = tallies.entry(kind.to_string()).or_default();
            match result {
                Finish::Won(Player::One) => tally.first_wins += 1,
                Finish::Won(Player::Two) => tally.second_wins += 1,
                Finish::Draw => tally.draws += 1,
                Finish::Unfinished => tally.unfinished += 1,
            }
            tally.plies += plies;
            tally.elapsed += elapsed;
        });
    });
    info!("benchmark finished in {:.2?}", start.elapsed());

    println!(
        "{:<16} {:>6} {:>6} {:>6} {:>6} {:>10} {:>12}",
        "game", "first", "second", "draw", "cap", "avg plies", "ms/match"
    );
    for (name, tally) in tallies.into_inner() {
        let played = tally.first_wins + tally.second_wins + tally.draws + tally.unfinished;
        let played_f = played.max(1) as f64;
        println!(
            "{:<16} {:>6} {:>6} {:>6} {:>6} {:>10.1} {:>12.2}",
            name,
            tally.first_wins,
            tally.second_wins,
            tally.draws,
            tally.unfinished,
            tally.plies as f64 / played_f,
            tally.elapsed.as_secs_f64() * 1000.0 / played_f
        );
    }
    println!("Total wall time: {:.3}s", start.elapsed().as_secs_f64());
}
