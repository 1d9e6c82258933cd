//! Knock Out! - command-line runner
//!
//! Sets up a game, attaches a tracker and plays it to the end.
//! Set `RUST_LOG=debug` to see every roll.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use knockout_dice::{DiceGame, GameConfig, GameTracker, KnockOutGame};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play a game of Knock Out!
#[derive(Parser, Debug)]
#[command(name = "knockout", version, about)]
struct Cli {
    /// Knock-out number for each player, in turn order (6, 7, 8 or 9)
    #[arg(short = 'p', long = "player", default_values_t = [6u8, 7, 8, 9])]
    players: Vec<u8>,

    /// JSON game configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random source (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Score that ends the game (overrides the config file)
    #[arg(short, long)]
    target: Option<u32>,

    /// Print the final tracker statistics as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GameConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(target) = cli.target {
        config = config.with_target_score(target);
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut game = KnockOutGame::builder()
        .config(config)
        .players(cli.players.iter().copied())
        .build()
        .context("setting up the game")?;

    let tracker = GameTracker::new();
    game.register_observer(tracker.clone());

    let outcome = game.play()?;
    info!(%outcome, turns = game.turn_number(), "Finished");

    for player in game.players() {
        let status = if player.is_knocked_out() { "out" } else { "in" };
        println!(
            "{:<10} knock-out {}  score {:>3}  {}",
            player.to_string(),
            player.knock_out_number(),
            player.score(),
            status
        );
    }
    println!("Result: {outcome}");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tracker.stats())?);
    }

    Ok(())
}
