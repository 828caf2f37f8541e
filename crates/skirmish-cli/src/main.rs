//! Skirmish headless runner.
//!
//! Loads characters, plays one encounter with the autopilot standing in for
//! the player, and prints the outcome.

mod autopilot;
mod cli;

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use skirmish_content::{load_battle_config, ContentError, Roster};
use skirmish_core::{BattleConfig, BattleController, BattleType, CharacterDefinition};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("skirmish=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_battle_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BattleConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let custom = match &args.roster {
        Some(path) => Some(Roster::load(path).with_context(|| format!("loading roster {}", path.display()))?),
        None => None,
    };
    let builtin = Roster::prototype();
    let lookup = |id: &str| -> Result<CharacterDefinition, ContentError> {
        match custom.as_ref().map(|r| r.get(id)) {
            Some(Ok(def)) => Ok(def.clone()),
            _ => builtin.get(id).cloned(),
        }
    };

    let players = args
        .players
        .iter()
        .map(|id| lookup(id))
        .collect::<Result<Vec<_>, _>>()?;
    let enemies = enemy_squad(lookup(&args.enemy)?, args.enemies, &config);

    let max_prompts = config.max_iterations;
    let ended = Rc::new(Cell::new(None));
    let sink = Rc::clone(&ended);
    let mut battle = BattleController::new(config);
    battle
        .begin_battle(BattleType::Normal, &players, &enemies, move |won| sink.set(Some(won)))
        .context("starting battle")?;

    autopilot::play(&mut battle, max_prompts);

    info!(phase = ?battle.phase(), "runner done");
    match battle.outcome() {
        Some(outcome) => println!("outcome: {outcome}"),
        None => println!("outcome: aborted"),
    }
    println!("turns: {}", battle.turn_counter());
    if let Some(won) = ended.get() {
        println!("player won: {won}");
    }
    Ok(())
}

/// `count` copies of `enemy`, never more than a squad can hold.
fn enemy_squad(
    enemy: CharacterDefinition,
    count: usize,
    config: &BattleConfig,
) -> Vec<CharacterDefinition> {
    vec![enemy; count.min(config.max_squad_size)]
}
