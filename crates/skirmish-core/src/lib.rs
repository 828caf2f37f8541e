//! # Skirmish Core
//!
//! Turn-based combat core for Skirmish.
//!
//! This crate runs encounters between a player team and an enemy team:
//! speed-ordered turns, layered damage mitigation, ability and enemy-AI
//! resolution, and a battle state machine that suspends on player input.
//! It performs no I/O and renders nothing.
//!
//! ## Architecture
//!
//! - **Actors**: [`CombatActor`] runtime state, owned by an [`ActorArena`]
//! - **Turn order**: [`TurnOrder`], a rotating speed-sorted queue
//! - **Resolver**: [`ActionResolver`] applies attacks, abilities, AI moves
//! - **Controller**: [`BattleController`] drives the round loop
//!
//! ## Usage
//!
//! ```
//! use skirmish_core::{
//!     Ability, AbilityEffect, AbilityId, AbilityTargeting, BaseStats, BattleConfig,
//!     BattleController, BattleType, CharacterDefinition,
//! };
//!
//! let strike = Ability::new("strike", "Strike", AbilityTargeting::SingleEnemy, AbilityEffect::BasicAttack);
//! let hero = CharacterDefinition::new("hero", "Hero", BaseStats::new(30, 3, 0, 5)).with_ability(strike);
//! let imp = CharacterDefinition::new("imp", "Imp", BaseStats::new(3, 2, 0, 2));
//!
//! let mut battle = BattleController::new(BattleConfig::default().with_seed(1));
//! battle.begin_battle(BattleType::Normal, &[hero], &[imp], |won| assert!(won))?;
//!
//! let foe = battle.enemies()[0];
//! battle.try_choose_ability(&AbilityId::new("strike"));
//! battle.try_choose_target(foe);
//! assert!(battle.outcome().is_some_and(|o| o.player_won()));
//! # Ok::<(), skirmish_core::BattleError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actor;
pub mod arena;
pub mod battle;
pub mod config;
pub mod definition;
pub mod error;
pub mod resolver;
pub mod turn_order;
pub mod weighted;

#[cfg(test)]
mod tests;

pub use actor::{ActorId, ActorSnapshot, CombatActor, Side, StatusEffect, StatusKind};
pub use arena::{build_squad, ActorArena};
pub use battle::{
    AbilityOption, BattleController, BattleEvent, BattleObserver, BattleOutcome, BattlePhase,
    BattleType, InputStage, RunningState, SkipReason,
};
pub use config::{BattleConfig, EnemyAiConfig};
pub use definition::{
    Ability, AbilityEffect, AbilityId, AbilityTargeting, BaseStats, CharacterDefinition, Passive,
    PassiveKind, PermanentItem, Resistances,
};
pub use error::{BattleError, DefinitionError};
pub use resolver::{ActionResolver, EnemyMove};
pub use turn_order::TurnOrder;
pub use weighted::WeightedTable;
