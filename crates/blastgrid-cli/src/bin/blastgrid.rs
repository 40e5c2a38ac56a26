//! Plays Blastgrid games automatically and prints the results.
//!
//! # Usage
//!
//! Play one game with a random seed:
//!
//! ```sh
//! cargo run --bin blastgrid
//! ```
//!
//! Replay a game from a seed and show the final board:
//!
//! ```sh
//! cargo run --bin blastgrid -- --seed <HEX> --show-board
//! ```
//!
//! Play many games in parallel, deriving their seeds from a phrase:
//!
//! ```sh
//! cargo run --release --bin blastgrid -- --phrase demo --games 1000 --strategy first
//! ```
//!
//! Keep the board and high score in a file between runs:
//!
//! ```sh
//! cargo run --bin blastgrid -- --store save.json --max-moves 20
//! ```

use std::{
    error::Error,
    path::{Path, PathBuf},
    process,
};

use blastgrid_cli::{PlayLimits, PlayReport, Strategy, load_config, play};
use blastgrid_game::{Game, GameConfig, JsonFileStore, MemoryStore};
use blastgrid_generator::SpawnSeed;
use clap::Parser;
use rayon::prelude::*;

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Seed of the first game, as 64 hex digits.
    #[arg(long, value_name = "HEX", conflicts_with = "phrase")]
    seed: Option<SpawnSeed>,

    /// Derive seeds from a phrase instead.
    #[arg(long, value_name = "TEXT")]
    phrase: Option<String>,

    /// Number of games to play.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    games: usize,

    /// How moves are chosen.
    #[arg(long, value_name = "STRATEGY", default_value = "greedy")]
    strategy: Strategy,

    /// Stop each game after this many drops.
    #[arg(long, value_name = "COUNT", default_value_t = 1_000)]
    max_moves: usize,

    /// Revives allowed per game.
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    revives: usize,

    /// Game configuration as JSON. Missing fields use defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save file for the board and high score. Only with a single game.
    #[arg(long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Print the final board of each game.
    #[arg(long)]
    show_board: bool,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    if args.games == 0 {
        eprintln!("--games must be at least 1.");
        process::exit(2);
    }
    if args.store.is_some() && args.games > 1 {
        eprintln!("--store can only be used with a single game.");
        process::exit(2);
    }

    let config = match &args.config {
        Some(path) => load_config(path).unwrap_or_else(|e| {
            eprintln!("{}: {e}", path.display());
            process::exit(1);
        }),
        None => GameConfig::default(),
    };
    let limits = PlayLimits {
        max_moves: args.max_moves,
        revives: args.revives,
    };

    let result = if let Some(path) = &args.store {
        play_saved(&args, config, limits, path).map(|report| vec![report])
    } else {
        (0..args.games)
            .into_par_iter()
            .map(|i| -> Result<PlayReport, BoxError> {
                let mut game = Game::new(config.clone(), game_seed(&args, i), MemoryStore::new())?;
                Ok(play(&mut game, args.strategy, limits))
            })
            .collect::<Result<Vec<_>, _>>()
    };
    let reports = result.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let [report] = reports.as_slice() {
        print_report(report, args.show_board);
    } else {
        print_summary(&reports, args.show_board);
    }
}

fn play_saved(
    args: &Args,
    config: GameConfig,
    limits: PlayLimits,
    path: &Path,
) -> Result<PlayReport, BoxError> {
    let store = JsonFileStore::open(path)?;
    let mut game = Game::new(config, game_seed(args, 0), store)?;
    Ok(play(&mut game, args.strategy, limits))
}

fn game_seed(args: &Args, index: usize) -> SpawnSeed {
    match (args.seed, &args.phrase) {
        (Some(seed), _) if index == 0 => seed,
        (Some(seed), _) => SpawnSeed::from_phrase(&format!("{seed}/{index}")),
        (None, Some(phrase)) if index == 0 => SpawnSeed::from_phrase(phrase),
        (None, Some(phrase)) => SpawnSeed::from_phrase(&format!("{phrase}/{index}")),
        (None, None) => SpawnSeed::random(),
    }
}

fn print_report(report: &PlayReport, show_board: bool) {
    println!("Seed:");
    println!("  {}", report.seed);
    println!();
    println!("Result:");
    println!("  Score: {}", report.score);
    println!("  High score: {}", report.high_score);
    println!("  Moves: {}", report.moves);
    println!("  Lines: {}", report.lines);
    println!("  Revives: {}", report.revives);
    println!("  Game over: {}", if report.game_over { "yes" } else { "no" });

    if show_board {
        println!();
        println!("Board:");
        for line in report.board.to_string().lines() {
            println!("  {line}");
        }
    }
}

fn print_summary(reports: &[PlayReport], show_board: bool) {
    for report in reports {
        println!(
            "{}  score {:>6}  moves {:>5}  lines {:>4}{}",
            report.seed,
            report.score,
            report.moves,
            report.lines,
            if report.game_over { "" } else { "  (move limit)" }
        );
        if show_board {
            for line in report.board.to_string().lines() {
                println!("    {line}");
            }
        }
    }

    let total: u64 = reports.iter().map(|report| report.score).sum();
    let games = u64::try_from(reports.len()).unwrap_or(u64::MAX).max(1);
    let best = reports.iter().max_by_key(|report| report.score);
    println!();
    println!("Games: {}", reports.len());
    println!("Mean score: {}", total / games);
    if let Some(best) = best {
        println!("Best score: {} (seed {})", best.score, best.seed);
    }
}
