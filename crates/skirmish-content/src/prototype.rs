//! Built-in prototype characters.

use skirmish_core::{Ability, AbilityEffect, AbilityTargeting, BaseStats, CharacterDefinition};

/// Id of the prototype player character.
pub const WARRIOR_ID: &str = "warrior";
/// Id of the prototype enemy.
pub const DEMON_ID: &str = "demon";

fn ability(id: &str, name: &str, description: &str, targeting: AbilityTargeting) -> Ability {
    Ability::new(id, name, targeting, AbilityEffect::from_id(id))
        .with_description(description)
        .with_cooldown(1)
}

/// The warrior: 30 HP, attack 3, speed 5.
///
/// Abilities, in equip order: Whirlwind (1-2 to every enemy), Meditate
/// (block all damage, heal 5 next turn), Marked Strike (mark an enemy) and
/// Power Strike (consume a mark for 5-10, otherwise 2-3).
#[must_use]
pub fn warrior() -> CharacterDefinition {
    let mut def = CharacterDefinition::new(WARRIOR_ID, "Warrior", BaseStats::new(30, 3, 0, 5))
        .with_ability(ability(
            "warrior_whirlwind",
            "Whirlwind",
            "AOE attack for 1-2 to all enemies.",
            AbilityTargeting::AllEnemies,
        ))
        .with_ability(ability(
            "warrior_meditate",
            "Meditate",
            "Block all damage and heal 5 next turn.",
            AbilityTargeting::SelfOnly,
        ))
        .with_ability(ability(
            "warrior_mark",
            "Marked Strike",
            "Mark an enemy.",
            AbilityTargeting::SingleEnemy,
        ))
        .with_ability(ability(
            "warrior_power_strike",
            "Power Strike",
            "Consume a Mark (if present) to deal 5-10 damage; otherwise light hit.",
            AbilityTargeting::SingleEnemy,
        ));
    def.description = "A sturdy frontline fighter.".to_string();
    def
}

/// The demon: 15 HP, attack 2, speed 2, no abilities. Acts through the
/// enemy policy.
#[must_use]
pub fn demon() -> CharacterDefinition {
    CharacterDefinition::new(DEMON_ID, "Demon", BaseStats::new(15, 2, 0, 2))
}

/// Every prototype character.
#[must_use]
pub fn all() -> Vec<CharacterDefinition> {
    vec![warrior(), demon()]
}
