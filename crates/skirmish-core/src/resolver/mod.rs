//! Action resolution.
//!
//! The [`ActionResolver`] turns a chosen action into actor mutations:
//!
//! - [`ActionResolver::basic_attack`]: attack stat plus the pending modifier
//! - [`ActionResolver::resolve_ability`]: dispatch on [`AbilityEffect`], then cooldown
//! - [`ActionResolver::enemy_act`]: the weighted enemy policy
//!
//! # Invariants
//!
//! - Every hit goes through [`CombatActor::take_damage`], so the mitigation
//!   order (block, defense, guard) lives in exactly one place.
//! - Effects are applied one actor at a time; two actors' mutations never
//!   interleave.
//! - The resolver keeps no reference to the arena or rosters past a call.
//! - Dead or unknown actors turn any operation into a no-op.
//!
//! [`AbilityEffect`]: crate::definition::AbilityEffect
//! [`CombatActor::take_damage`]: crate::actor::CombatActor::take_damage

mod ability;
mod enemy_ai;

pub use enemy_ai::EnemyMove;

use rand::Rng;
use tracing::trace;

use crate::actor::ActorId;
use crate::arena::ActorArena;
use crate::config::EnemyAiConfig;
use crate::weighted::WeightedTable;

/// Resolves attacks, abilities and enemy turns against an [`ActorArena`].
///
/// # Example
///
/// ```
/// use skirmish_core::resolver::ActionResolver;
/// use skirmish_core::arena::ActorArena;
/// use skirmish_core::actor::Side;
/// use skirmish_core::config::BattleConfig;
/// use skirmish_core::definition::{BaseStats, CharacterDefinition};
///
/// let config = BattleConfig::default();
/// let mut arena = ActorArena::new();
/// let warrior = arena.spawn(Side::Player, &CharacterDefinition::new("w", "W", BaseStats::new(30, 3, 0, 5)), &config);
/// let demon = arena.spawn(Side::Enemy, &CharacterDefinition::new("d", "D", BaseStats::new(15, 2, 0, 2)), &config);
///
/// let resolver = ActionResolver::new(config.enemy_ai.clone());
/// resolver.basic_attack(&mut arena, warrior, demon);
/// assert_eq!(arena.get(demon).unwrap().current_hp(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct ActionResolver {
    ai: EnemyAiConfig,
    ai_moves: WeightedTable<EnemyMove>,
}

impl ActionResolver {
    /// Creates a resolver with the given enemy tuning.
    #[must_use]
    pub fn new(ai: EnemyAiConfig) -> Self {
        let ai_moves = enemy_ai::move_table(&ai);
        Self { ai, ai_moves }
    }

    /// Returns the enemy tuning.
    #[must_use]
    pub fn ai_config(&self) -> &EnemyAiConfig {
        &self.ai
    }

    /// Basic attack: `max(1, attack) + next-attack modifier`, floored at 0.
    ///
    /// Consumes the source's modifier exactly once. Returns the HP the target
    /// lost; zero if either actor is dead or unknown.
    pub fn basic_attack(&self, actors: &mut ActorArena, source: ActorId, target: ActorId) -> i32 {
        if !actors.is_alive(source) || !actors.is_alive(target) {
            return 0;
        }
        let Some(attacker) = actors.get_mut(source) else {
            return 0;
        };
        let base = attacker.attack().max(1);
        let modifier = attacker.consume_next_attack_modifier();
        let raw = base.saturating_add(modifier).max(0);
        trace!(%source, %target, base, modifier, "basic attack");
        deal_damage(actors, target, raw)
    }
}

impl Default for ActionResolver {
    fn default() -> Self {
        Self::new(EnemyAiConfig::default())
    }
}

/// Hits a living target; returns the HP it actually lost.
fn deal_damage(actors: &mut ActorArena, target: ActorId, amount: i32) -> i32 {
    actors
        .get_mut(target)
        .filter(|t| t.is_alive())
        .map_or(0, |t| t.take_damage(amount.max(0)))
}

/// Uniform roll in an inclusive range; a reversed range is read low-to-high.
fn roll<R: Rng + ?Sized>(rng: &mut R, a: i32, b: i32) -> i32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    rng.gen_range(lo..=hi)
}
