//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Runs one encounter headlessly with a scripted player.
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Headless turn-based encounter runner")]
#[command(version)]
pub struct Args {
    /// JSON roster with extra character definitions
    #[arg(long, value_name = "FILE")]
    pub roster: Option<PathBuf>,

    /// Character id for the player team; repeat for more members
    #[arg(long = "player", value_name = "ID", default_value = "warrior")]
    pub players: Vec<String>,

    /// Character id used for every enemy
    #[arg(long, value_name = "ID", default_value = "demon")]
    pub enemy: String,

    /// Number of enemies
    #[arg(long, default_value_t = 2)]
    pub enemies: usize,

    /// RNG seed for a reproducible encounter
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON battle config; absent fields keep their defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
