//! Test helpers: prototype definitions and a scripted player.

use crate::actor::ActorId;
use crate::battle::{BattleController, BattleEvent, BattleType};
use crate::config::BattleConfig;
use crate::definition::{Ability, AbilityEffect, AbilityTargeting, BaseStats, CharacterDefinition};

// =============================================================================
// Definitions
// =============================================================================

fn warrior_ability(id: &str, name: &str, targeting: AbilityTargeting) -> Ability {
    Ability::new(id, name, targeting, AbilityEffect::from_id(id)).with_cooldown(1)
}

/// The prototype warrior: 30 HP, attack 3, speed 5, four abilities.
pub fn warrior() -> CharacterDefinition {
    CharacterDefinition::new("warrior", "Warrior", BaseStats::new(30, 3, 0, 5))
        .with_ability(warrior_ability("warrior_whirlwind", "Whirlwind", AbilityTargeting::AllEnemies))
        .with_ability(warrior_ability("warrior_meditate", "Meditate", AbilityTargeting::SelfOnly))
        .with_ability(warrior_ability("warrior_mark", "Marked Strike", AbilityTargeting::SingleEnemy))
        .with_ability(warrior_ability(
            "warrior_power_strike",
            "Power Strike",
            AbilityTargeting::SingleEnemy,
        ))
}

/// The prototype demon: 15 HP, attack 2, speed 2, no abilities.
pub fn demon() -> CharacterDefinition {
    CharacterDefinition::new("demon", "Demon", BaseStats::new(15, 2, 0, 2))
}

/// A fighter with a single basic-attack ability.
pub fn brawler(id: &str, hp: i32, attack: i32, speed: i32) -> CharacterDefinition {
    CharacterDefinition::new(id, id, BaseStats::new(hp, attack, 0, speed)).with_ability(Ability::new(
        "punch",
        "Punch",
        AbilityTargeting::SingleEnemy,
        AbilityEffect::BasicAttack,
    ))
}

// =============================================================================
// Driving a battle
// =============================================================================

/// Starts a seeded battle.
pub fn start(
    players: &[CharacterDefinition],
    enemies: &[CharacterDefinition],
    seed: u64,
) -> BattleController {
    let mut battle = BattleController::new(BattleConfig::default().with_seed(seed));
    battle
        .begin_battle(BattleType::Normal, players, enemies, |_| {})
        .expect("valid teams");
    battle
}

/// Answers the latest action prompt: first ready ability, lowest-HP target.
///
/// Returns false if there was no prompt to answer.
pub fn answer_prompt(battle: &mut BattleController) -> bool {
    let prompt = battle.take_events().into_iter().rev().find_map(|event| match event {
        BattleEvent::PlayerActionPrompt {
            abilities,
            enemy_candidates,
            ally_candidates,
            ..
        } => Some((abilities, enemy_candidates, ally_candidates)),
        _ => None,
    });
    let Some((abilities, enemies, allies)) = prompt else {
        return false;
    };
    let Some(option) = abilities.iter().find(|o| o.ready).or_else(|| abilities.first()) else {
        return false;
    };
    let ability = option.ability.clone();
    battle.try_choose_ability(&ability.id);
    if ability.targeting.requires_target_choice() {
        let pool = if ability.targeting.targets_allies() { allies } else { enemies };
        if let Some(target) = pool.iter().min_by_key(|s| s.hp) {
            battle.try_choose_target(target.id);
        }
    }
    true
}

/// Plays until the battle leaves the input window, at most `max_prompts` times.
pub fn autoplay(battle: &mut BattleController, max_prompts: usize) {
    for _ in 0..max_prompts {
        if !battle.phase().is_awaiting_input() || !answer_prompt(battle) {
            return;
        }
    }
}

/// Current HP of an actor; -1 if unknown.
pub fn hp(battle: &BattleController, id: ActorId) -> i32 {
    battle.actor(id).map_or(-1, |a| a.current_hp())
}
