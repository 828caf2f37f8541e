//! Character and ability definitions.
//!
//! Definitions are immutable data records supplied by content collaborators.
//! The combat core reads them when an encounter is set up and never writes
//! back: every [`CombatActor`](crate::actor::CombatActor) clones the stats it
//! needs.
//!
//! # Example
//!
//! ```
//! use skirmish_core::definition::{
//!     Ability, AbilityEffect, AbilityTargeting, BaseStats, CharacterDefinition,
//! };
//!
//! let strike = Ability::new("strike", "Strike", AbilityTargeting::SingleEnemy, AbilityEffect::BasicAttack)
//!     .with_cooldown(1);
//! let def = CharacterDefinition::new("squire", "Squire", BaseStats::new(20, 3, 0, 4))
//!     .with_ability(strike);
//!
//! assert!(def.validate().is_ok());
//! assert_eq!(def.abilities[0].cooldown_turns, 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::actor::status::StatusKind;
use crate::error::DefinitionError;

/// Most abilities a definition may offer.
pub const MAX_DEFINED_ABILITIES: usize = 7;
/// Most passives a definition may offer.
pub const MAX_DEFINED_PASSIVES: usize = 2;
/// Most permanent items a definition may carry.
pub const MAX_DEFINED_ITEMS: usize = 3;

// =============================================================================
// Stats
// =============================================================================

/// Elemental and condition resistances, each in `0.0..=1.0`.
///
/// Carried as data for content and presentation; the damage formula does
/// not read them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resistances {
    /// Physical damage resistance.
    pub physical: f32,
    /// Magic damage resistance.
    pub magic: f32,
    /// Poison resistance.
    pub poison: f32,
    /// Bleed resistance.
    pub bleed: f32,
    /// Stun resistance.
    pub stun: f32,
}

/// Base statistics of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    /// Maximum hit points.
    pub max_hp: i32,
    /// Starting hit points (clamped into `0..=max_hp` when an actor is built).
    pub current_hp: i32,
    /// Outgoing basic attack damage.
    pub attack: i32,
    /// Flat reduction applied to every incoming hit.
    pub defense: i32,
    /// Turn order priority; higher acts first.
    pub speed: i32,
    /// Resistances.
    pub resistances: Resistances,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            max_hp: 100,
            current_hp: 100,
            attack: 10,
            defense: 5,
            speed: 10,
            resistances: Resistances::default(),
        }
    }
}

impl BaseStats {
    /// Creates stats at full health with no resistances.
    #[must_use]
    pub fn new(max_hp: i32, attack: i32, defense: i32, speed: i32) -> Self {
        Self {
            max_hp,
            current_hp: max_hp,
            attack,
            defense,
            speed,
            resistances: Resistances::default(),
        }
    }
}

// =============================================================================
// Abilities
// =============================================================================

/// Identifier of an ability. Cooldowns are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityId(String);

impl AbilityId {
    /// Creates an id from a string.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AbilityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AbilityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Who an ability may be aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityTargeting {
    /// The acting actor; resolved automatically.
    #[serde(rename = "Self")]
    SelfOnly,
    /// One living enemy, picked by the player.
    SingleEnemy,
    /// Every living enemy.
    AllEnemies,
    /// One living ally (including self), picked by the player.
    SingleAlly,
    /// Every living ally.
    AllAllies,
    /// One living enemy picked at random on resolution.
    RandomEnemy,
}

impl AbilityTargeting {
    /// Returns true if the player must pick a target after the ability.
    #[must_use]
    pub const fn requires_target_choice(self) -> bool {
        matches!(self, Self::SingleEnemy | Self::SingleAlly)
    }

    /// Returns true if the player picks among allies rather than enemies.
    #[must_use]
    pub const fn targets_allies(self) -> bool {
        matches!(self, Self::SingleAlly | Self::AllAllies | Self::SelfOnly)
    }
}

impl fmt::Display for AbilityTargeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SelfOnly => "Self",
            Self::SingleEnemy => "SingleEnemy",
            Self::AllEnemies => "AllEnemies",
            Self::SingleAlly => "SingleAlly",
            Self::AllAllies => "AllAllies",
            Self::RandomEnemy => "RandomEnemy",
        };
        f.write_str(name)
    }
}

/// What an ability does once resolved.
///
/// Ranges are inclusive; a reversed range is read low-to-high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AbilityEffect {
    /// Hits every living enemy for a separate roll in `min..=max`.
    AreaStrike {
        /// Lowest roll.
        min: i32,
        /// Highest roll.
        max: i32,
    },
    /// Blocks all damage until the user's next turn, then heals.
    BlockAndRecover {
        /// Heal applied at the start of the next turn.
        heal_next_turn: i32,
    },
    /// Adds one mark stack to the chosen target.
    ApplyMark,
    /// Consumes a mark on the chosen target for a heavy hit, or lands a
    /// light hit if the target carries no mark.
    ConsumeMarkStrike {
        /// Lowest roll when a mark is consumed.
        marked_min: i32,
        /// Highest roll when a mark is consumed.
        marked_max: i32,
        /// Lowest roll without a mark.
        unmarked_min: i32,
        /// Highest roll without a mark.
        unmarked_max: i32,
    },
    /// A basic attack on the chosen target. Unknown abilities resolve as this.
    #[default]
    BasicAttack,
}

impl AbilityEffect {
    /// Maps the prototype warrior ability ids to their effects.
    ///
    /// Any other id resolves as [`AbilityEffect::BasicAttack`].
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id {
            "warrior_whirlwind" => Self::AreaStrike { min: 1, max: 2 },
            "warrior_meditate" => Self::BlockAndRecover { heal_next_turn: 5 },
            "warrior_mark" => Self::ApplyMark,
            "warrior_power_strike" => Self::ConsumeMarkStrike {
                marked_min: 5,
                marked_max: 10,
                unmarked_min: 2,
                unmarked_max: 3,
            },
            _ => Self::BasicAttack,
        }
    }
}

/// An ability record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    /// Identifier, also the cooldown key.
    pub id: AbilityId,
    /// Display name.
    pub name: String,
    /// Flavor text.
    #[serde(default)]
    pub description: String,
    /// Targeting mode.
    pub targeting: AbilityTargeting,
    /// Scalar used by passives and future effects.
    #[serde(default)]
    pub base_power: i32,
    /// Turns before the ability may be used again.
    #[serde(default)]
    pub cooldown_turns: u32,
    /// Effect resolved by the action resolver.
    #[serde(default)]
    pub effect: AbilityEffect,
    /// Statuses applied to every target the effect touched.
    #[serde(default)]
    pub applies_statuses: Vec<StatusKind>,
    /// Duration of applied statuses, in turns.
    #[serde(default)]
    pub status_duration: u32,
}

impl Ability {
    /// Creates an ability with no cooldown, power or statuses.
    #[must_use]
    pub fn new(id: &str, name: &str, targeting: AbilityTargeting, effect: AbilityEffect) -> Self {
        Self {
            id: AbilityId::new(id),
            name: name.to_string(),
            description: String::new(),
            targeting,
            base_power: 0,
            cooldown_turns: 0,
            effect,
            applies_statuses: Vec::new(),
            status_duration: 0,
        }
    }

    /// Sets the cooldown.
    #[must_use]
    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.cooldown_turns = turns;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the base power.
    #[must_use]
    pub fn with_power(mut self, power: i32) -> Self {
        self.base_power = power;
        self
    }

    /// Adds a status applied on hit.
    #[must_use]
    pub fn with_status(mut self, kind: StatusKind, duration: u32) -> Self {
        self.applies_statuses.push(kind);
        self.status_duration = duration;
        self
    }
}

// =============================================================================
// Passives and items
// =============================================================================

/// What a passive does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PassiveKind {
    /// Heals `power` (at least 1) at the start of each turn.
    Regeneration {
        /// Heal per turn.
        power: i32,
    },
    /// No combat effect.
    #[default]
    Inert,
}

/// A passive record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passive {
    /// Identifier.
    pub id: AbilityId,
    /// Display name.
    pub name: String,
    /// Effect kind.
    #[serde(default)]
    pub kind: PassiveKind,
}

impl Passive {
    /// Creates a passive.
    #[must_use]
    pub fn new(id: &str, name: &str, kind: PassiveKind) -> Self {
        Self {
            id: AbilityId::new(id),
            name: name.to_string(),
            kind,
        }
    }
}

/// A permanent item record. Bonuses are carried as data only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermanentItem {
    /// Identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Bonus max HP.
    pub bonus_hp: i32,
    /// Bonus attack.
    pub bonus_attack: i32,
    /// Bonus defense.
    pub bonus_defense: i32,
    /// Bonus speed.
    pub bonus_speed: i32,
}

// =============================================================================
// Character definition
// =============================================================================

/// An immutable character template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDefinition {
    /// Identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flavor text.
    #[serde(default)]
    pub description: String,
    /// Base stats, cloned into each actor.
    #[serde(default)]
    pub base_stats: BaseStats,
    /// Ability pool in equip order.
    #[serde(default)]
    pub abilities: Vec<Ability>,
    /// Passive choices; the first is selected by default.
    #[serde(default)]
    pub passives: Vec<Passive>,
    /// Permanent items in assignment order.
    #[serde(default)]
    pub items: Vec<PermanentItem>,
}

impl CharacterDefinition {
    /// Creates a definition with no abilities, passives or items.
    #[must_use]
    pub fn new(id: &str, name: &str, base_stats: BaseStats) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            base_stats,
            abilities: Vec::new(),
            passives: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Appends an ability to the pool.
    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Appends a passive choice.
    #[must_use]
    pub fn with_passive(mut self, passive: Passive) -> Self {
        self.passives.push(passive);
        self
    }

    /// Appends a permanent item.
    #[must_use]
    pub fn with_item(mut self, item: PermanentItem) -> Self {
        self.items.push(item);
        self
    }

    /// Checks pool sizes, max HP and ability ids.
    ///
    /// # Errors
    ///
    /// Returns the first [`DefinitionError`] found.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        let character = || self.id.clone();

        if self.base_stats.max_hp <= 0 {
            return Err(DefinitionError::NonPositiveMaxHp {
                character: character(),
                max_hp: self.base_stats.max_hp,
            });
        }
        if self.abilities.len() > MAX_DEFINED_ABILITIES {
            return Err(DefinitionError::TooManyAbilities {
                character: character(),
                count: self.abilities.len(),
                max: MAX_DEFINED_ABILITIES,
            });
        }
        if self.passives.len() > MAX_DEFINED_PASSIVES {
            return Err(DefinitionError::TooManyPassives {
                character: character(),
                count: self.passives.len(),
                max: MAX_DEFINED_PASSIVES,
            });
        }
        if self.items.len() > MAX_DEFINED_ITEMS {
            return Err(DefinitionError::TooManyItems {
                character: character(),
                count: self.items.len(),
                max: MAX_DEFINED_ITEMS,
            });
        }

        let mut seen = BTreeSet::new();
        for ability in &self.abilities {
            if ability.id.as_str().is_empty() {
                return Err(DefinitionError::EmptyAbilityId {
                    character: character(),
                });
            }
            if !seen.insert(ability.id.as_str()) {
                return Err(DefinitionError::DuplicateAbility {
                    character: character(),
                    ability: ability.id.to_string(),
                });
            }
        }
        Ok(())
    }
}
