//! Tunable encounter parameters.
//!
//! Every field has a default so partial JSON documents deserialize cleanly:
//!
//! ```
//! use skirmish_core::config::BattleConfig;
//!
//! let config = BattleConfig::default();
//! assert_eq!(config.max_iterations, 200);
//! assert_eq!(config.max_equipped_abilities, 4);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for a single encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Hard ceiling on round-loop iterations; exceeding it ends in a draw.
    pub max_iterations: u32,
    /// Abilities equipped per actor, taken in definition order.
    pub max_equipped_abilities: usize,
    /// Actors built per side from a list of definitions.
    pub max_squad_size: usize,
    /// Permanent items active at once.
    pub max_active_items: usize,
    /// Enemy behavior tuning.
    pub enemy_ai: EnemyAiConfig,
    /// Seed for the encounter RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            max_equipped_abilities: 4,
            max_squad_size: 4,
            max_active_items: 2,
            enemy_ai: EnemyAiConfig::default(),
            seed: None,
        }
    }
}

impl BattleConfig {
    /// Returns a copy of this config with a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Weights and numbers for the enemy policy.
///
/// The three branches are picked with probability `drain_chance`,
/// `guard_chance` and whatever is left over, in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyAiConfig {
    /// Probability of the life-drain branch.
    pub drain_chance: f64,
    /// Probability of the guard-and-poke branch.
    pub guard_chance: f64,
    /// Damage dealt by the drain before mitigation.
    pub drain_damage: i32,
    /// Flat guard applied to self before poking.
    pub guard_amount: i32,
    /// Turns the self-guard lasts, counted by the actor's own `end_turn`.
    pub guard_turns: u32,
    /// Damage dealt by the poke.
    pub poke_damage: i32,
    /// Damage dealt by the fallback strike.
    pub debuff_damage: i32,
    /// Modifier added to the struck target's next attack.
    pub attack_debuff: i32,
}

impl Default for EnemyAiConfig {
    fn default() -> Self {
        Self {
            drain_chance: 0.10,
            guard_chance: 0.50,
            drain_damage: 5,
            guard_amount: 2,
            // One turn would expire in the same end_turn that applied it.
            guard_turns: 2,
            poke_damage: 2,
            debuff_damage: 2,
            attack_debuff: -1,
        }
    }
}

impl EnemyAiConfig {
    /// Probability left for the fallback branch, never negative.
    #[must_use]
    pub fn fallback_chance(&self) -> f64 {
        (1.0 - self.drain_chance.max(0.0) - self.guard_chance.max(0.0)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_most_likely_by_default() {
        let ai = EnemyAiConfig::default();
        assert!(ai.drain_chance < ai.guard_chance);
        assert!((ai.fallback_chance() - 0.40).abs() < 1e-9);
    }

    #[test]
    fn fallback_chance_floors_at_zero() {
        let ai = EnemyAiConfig {
            drain_chance: 0.7,
            guard_chance: 0.7,
            ..EnemyAiConfig::default()
        };
        assert!(ai.fallback_chance().abs() < f64::EPSILON);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: BattleConfig =
            serde_json::from_str(r#"{ "max_iterations": 50, "enemy_ai": { "poke_damage": 4 } }"#)
                .unwrap();
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.enemy_ai.poke_damage, 4);
        assert_eq!(config.enemy_ai.drain_damage, 5);
        assert_eq!(config.max_squad_size, 4);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn with_seed_sets_seed() {
        let config = BattleConfig::default().with_seed(7);
        assert_eq!(config.seed, Some(7));
    }
}
