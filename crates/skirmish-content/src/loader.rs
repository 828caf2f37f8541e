//! JSON roster and config loading.
//!
//! A roster document is either a bare array of characters or an object with
//! a `characters` array. Ability records may leave out `effect`; it is then
//! inferred from the ability id with [`AbilityEffect::from_id`].
//!
//! ```json
//! {
//!   "characters": [
//!     {
//!       "id": "squire",
//!       "name": "Squire",
//!       "base_stats": { "max_hp": 20, "current_hp": 20, "attack": 3, "speed": 4 },
//!       "abilities": [
//!         { "id": "warrior_mark", "name": "Mark", "targeting": "SingleEnemy" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use skirmish_core::{
    Ability, AbilityEffect, AbilityId, AbilityTargeting, BaseStats, BattleConfig,
    CharacterDefinition, Passive, PermanentItem, StatusKind,
};
use tracing::debug;

use crate::error::ContentError;
use crate::prototype;

// =============================================================================
// Raw records
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RosterDocument {
    List(Vec<CharacterRecord>),
    Wrapped { characters: Vec<CharacterRecord> },
}

#[derive(Debug, Deserialize)]
struct CharacterRecord {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    base_stats: BaseStats,
    #[serde(default)]
    abilities: Vec<AbilityRecord>,
    #[serde(default)]
    passives: Vec<Passive>,
    #[serde(default)]
    items: Vec<PermanentItem>,
}

#[derive(Debug, Deserialize)]
struct AbilityRecord {
    id: AbilityId,
    name: String,
    #[serde(default)]
    description: String,
    targeting: AbilityTargeting,
    #[serde(default)]
    base_power: i32,
    #[serde(default)]
    cooldown_turns: u32,
    /// `None` means infer from the id.
    #[serde(default)]
    effect: Option<AbilityEffect>,
    #[serde(default)]
    applies_statuses: Vec<StatusKind>,
    #[serde(default)]
    status_duration: u32,
}

impl AbilityRecord {
    fn resolve(self) -> Ability {
        let effect = self
            .effect
            .unwrap_or_else(|| AbilityEffect::from_id(self.id.as_str()));
        Ability {
            id: self.id,
            name: self.name,
            description: self.description,
            targeting: self.targeting,
            base_power: self.base_power,
            cooldown_turns: self.cooldown_turns,
            effect,
            applies_statuses: self.applies_statuses,
            status_duration: self.status_duration,
        }
    }
}

impl CharacterRecord {
    fn resolve(self) -> CharacterDefinition {
        CharacterDefinition {
            id: self.id,
            name: self.name,
            description: self.description,
            base_stats: self.base_stats,
            abilities: self.abilities.into_iter().map(AbilityRecord::resolve).collect(),
            passives: self.passives,
            items: self.items,
        }
    }
}

// =============================================================================
// Roster
// =============================================================================

/// A validated set of character definitions, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    characters: Vec<CharacterDefinition>,
}

impl Roster {
    /// The built-in warrior and demon.
    #[must_use]
    pub fn prototype() -> Self {
        Self {
            characters: prototype::all(),
        }
    }

    /// Builds a roster from definitions, validating each.
    ///
    /// # Errors
    ///
    /// Returns the first limit violation or a duplicate character id.
    pub fn from_definitions(characters: Vec<CharacterDefinition>) -> Result<Self, ContentError> {
        let mut seen = BTreeSet::new();
        for def in &characters {
            def.validate()?;
            if !seen.insert(def.id.as_str()) {
                return Err(ContentError::DuplicateCharacter(def.id.clone()));
            }
        }
        Ok(Self { characters })
    }

    /// Parses and validates a JSON roster document.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or any validation error.
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let records = match serde_json::from_str::<RosterDocument>(json)? {
            RosterDocument::List(records) | RosterDocument::Wrapped { characters: records } => records,
        };
        let roster = Self::from_definitions(records.into_iter().map(CharacterRecord::resolve).collect())?;
        debug!(characters = roster.len(), "roster parsed");
        Ok(roster)
    }

    /// Reads a JSON roster file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, or as [`Roster::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let json = read_file(path)?;
        Self::from_json_str(&json)
    }

    /// Looks a character up by id.
    ///
    /// # Errors
    ///
    /// [`ContentError::UnknownCharacter`] if the id is absent.
    pub fn get(&self, id: &str) -> Result<&CharacterDefinition, ContentError> {
        self.characters
            .iter()
            .find(|def| def.id == id)
            .ok_or_else(|| ContentError::UnknownCharacter(id.to_string()))
    }

    /// All characters in document order.
    #[must_use]
    pub fn characters(&self) -> &[CharacterDefinition] {
        &self.characters
    }

    /// Character ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.characters.iter().map(|def| def.id.as_str())
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns true if the roster has no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

// =============================================================================
// Config
// =============================================================================

/// Reads a JSON battle config; absent fields keep their defaults.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a valid config document.
pub fn load_battle_config(path: &Path) -> Result<BattleConfig, ContentError> {
    let json = read_file(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn read_file(path: &Path) -> Result<String, ContentError> {
    std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::DefinitionError;

    mod parse_tests {
        use super::*;

        #[test]
        fn wrapped_document_infers_effects() {
            let roster = Roster::from_json_str(
                r#"{
                    "characters": [{
                        "id": "squire",
                        "name": "Squire",
                        "base_stats": { "max_hp": 20, "current_hp": 20, "attack": 3, "defense": 0, "speed": 4 },
                        "abilities": [
                            { "id": "warrior_whirlwind", "name": "Spin", "targeting": "AllEnemies", "cooldown_turns": 2 },
                            { "id": "jab", "name": "Jab", "targeting": "SingleEnemy" },
                            {
                                "id": "custom",
                                "name": "Custom",
                                "targeting": "Self",
                                "effect": { "type": "BlockAndRecover", "heal_next_turn": 3 }
                            }
                        ]
                    }]
                }"#,
            )
            .unwrap();

            let squire = roster.get("squire").unwrap();
            assert_eq!(squire.base_stats.max_hp, 20);
            let effects: Vec<_> = squire.abilities.iter().map(|a| a.effect).collect();
            assert_eq!(
                effects,
                vec![
                    AbilityEffect::AreaStrike { min: 1, max: 2 },
                    AbilityEffect::BasicAttack,
                    AbilityEffect::BlockAndRecover { heal_next_turn: 3 },
                ]
            );
            assert_eq!(squire.abilities[0].cooldown_turns, 2);
            assert_eq!(squire.abilities[2].targeting, AbilityTargeting::SelfOnly);
        }

        #[test]
        fn bare_list_with_default_stats() {
            let roster = Roster::from_json_str(r#"[{ "id": "blob", "name": "Blob" }]"#).unwrap();
            assert_eq!(roster.len(), 1);
            assert_eq!(roster.get("blob").unwrap().base_stats, BaseStats::default());
        }

        #[test]
        fn statuses_parse() {
            let roster = Roster::from_json_str(
                r#"[{
                    "id": "viper",
                    "name": "Viper",
                    "abilities": [{
                        "id": "bite",
                        "name": "Bite",
                        "targeting": "SingleEnemy",
                        "applies_statuses": ["Poison"],
                        "status_duration": 3
                    }]
                }]"#,
            )
            .unwrap();
            let bite = &roster.get("viper").unwrap().abilities[0];
            assert_eq!(bite.applies_statuses, vec![StatusKind::Poison]);
            assert_eq!(bite.status_duration, 3);
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn malformed_json_is_reported() {
            assert!(matches!(
                Roster::from_json_str("{ not json"),
                Err(ContentError::Json(_))
            ));
        }

        #[test]
        fn limits_are_enforced() {
            let abilities: Vec<String> = (0..8)
                .map(|i| format!(r#"{{ "id": "a{i}", "name": "A", "targeting": "SingleEnemy" }}"#))
                .collect();
            let json = format!(
                r#"[{{ "id": "greedy", "name": "Greedy", "abilities": [{}] }}]"#,
                abilities.join(",")
            );
            assert!(matches!(
                Roster::from_json_str(&json),
                Err(ContentError::Definition(DefinitionError::TooManyAbilities { count: 8, .. }))
            ));
        }

        #[test]
        fn duplicate_characters_are_rejected() {
            let result = Roster::from_json_str(
                r#"[{ "id": "twin", "name": "A" }, { "id": "twin", "name": "B" }]"#,
            );
            assert!(matches!(result, Err(ContentError::DuplicateCharacter(id)) if id == "twin"));
        }

        #[test]
        fn unknown_lookup_fails() {
            let roster = Roster::prototype();
            assert!(matches!(
                roster.get("dragon"),
                Err(ContentError::UnknownCharacter(id)) if id == "dragon"
            ));
        }

        #[test]
        fn missing_file_is_an_io_error() {
            let path = Path::new("/definitely/not/here/roster.json");
            assert!(matches!(Roster::load(path), Err(ContentError::Io { .. })));
            assert!(matches!(load_battle_config(path), Err(ContentError::Io { .. })));
        }
    }

    #[test]
    fn prototype_roster_lists_ids_in_order() {
        let ids: Vec<_> = Roster::prototype().ids().map(str::to_string).collect();
        assert_eq!(ids, vec!["warrior", "demon"]);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: BattleConfig =
            serde_json::from_str(r#"{ "max_iterations": 50, "enemy_ai": { "drain_chance": 0.2 } }"#).unwrap();
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.max_equipped_abilities, 4);
        assert!((config.enemy_ai.drain_chance - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.enemy_ai.guard_turns, 2);
    }
}
