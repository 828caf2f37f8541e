//! Scripted stand-in for the player UI.

use skirmish_core::{AbilityId, AbilityOption, ActorId, ActorSnapshot, BattleController, BattleEvent};
use tracing::{debug, info};

/// A player decision: which ability, and the target if it needs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Ability to use.
    pub ability: AbilityId,
    /// Target for single-target abilities.
    pub target: Option<ActorId>,
}

/// Picks the first ready ability, or the first one at all if none is ready
/// (which forfeits the turn). Single-target abilities go at the candidate
/// with the least HP.
pub fn decide(
    abilities: &[AbilityOption],
    enemy_candidates: &[ActorSnapshot],
    ally_candidates: &[ActorSnapshot],
) -> Option<Decision> {
    let option = abilities
        .iter()
        .find(|o| o.ready)
        .or_else(|| abilities.first())?;
    let targeting = option.ability.targeting;
    let target = if targeting.requires_target_choice() {
        let pool = if targeting.targets_allies() {
            ally_candidates
        } else {
            enemy_candidates
        };
        Some(pool.iter().min_by_key(|s| s.hp)?.id)
    } else {
        None
    };
    Some(Decision {
        ability: option.ability.id.clone(),
        target,
    })
}

/// Answers prompts until the battle leaves the input window.
///
/// Gives up, and aborts the battle, after `max_prompts` prompts or on a
/// prompt it cannot answer.
pub fn play(battle: &mut BattleController, max_prompts: u32) {
    let mut prompts = 0;
    while battle.phase().is_awaiting_input() {
        let events = battle.take_events();
        log_events(&events);

        let decision = events.into_iter().rev().find_map(|event| match event {
            BattleEvent::PlayerActionPrompt {
                abilities,
                enemy_candidates,
                ally_candidates,
                ..
            } => decide(&abilities, &enemy_candidates, &ally_candidates),
            _ => None,
        });
        prompts += 1;
        let Some(decision) = decision.filter(|_| prompts <= max_prompts) else {
            info!(prompts, "autopilot gave up");
            battle.abort();
            return;
        };

        debug!(ability = %decision.ability, target = ?decision.target, "autopilot choice");
        battle.try_choose_ability(&decision.ability);
        if let Some(target) = decision.target {
            battle.try_choose_target(target);
        }
        if battle.pending_ability().is_some() {
            // Target was refused; go back and get a fresh prompt.
            battle.cancel_ability();
        }
    }
    log_events(&battle.take_events());
}

fn log_events(events: &[BattleEvent]) {
    for event in events {
        match event {
            BattleEvent::TurnCounterUpdated { turn, current, .. } => {
                info!(turn, actor = %current.name, hp = current.hp, "turn");
            }
            BattleEvent::TurnSkipped { actor, reason } => {
                info!(%actor, ?reason, "turn skipped");
            }
            other => debug!(?other, "event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_content::prototype;
    use skirmish_core::{BattleConfig, BattleType};

    fn option(id: &str, targeting: skirmish_core::AbilityTargeting, ready: bool) -> AbilityOption {
        AbilityOption {
            ability: skirmish_core::Ability::new(
                id,
                id,
                targeting,
                skirmish_core::AbilityEffect::BasicAttack,
            ),
            ready,
            cooldown_remaining: u32::from(!ready),
        }
    }

    fn snapshot(battle: &BattleController, id: ActorId) -> ActorSnapshot {
        battle.actor(id).unwrap().snapshot()
    }

    #[test]
    fn picks_first_ready_and_weakest_enemy() {
        let mut battle = BattleController::new(BattleConfig::default().with_seed(1));
        battle
            .begin_battle(
                BattleType::Normal,
                &[prototype::warrior()],
                &[prototype::demon(), prototype::demon()],
                |_| {},
            )
            .unwrap();
        let mut weak = snapshot(&battle, battle.enemies()[1]);
        weak.hp = 4;
        let strong = snapshot(&battle, battle.enemies()[0]);

        let abilities = vec![
            option("cooling", skirmish_core::AbilityTargeting::SingleEnemy, false),
            option("jab", skirmish_core::AbilityTargeting::SingleEnemy, true),
        ];
        let decision = decide(&abilities, &[strong, weak.clone()], &[]).unwrap();
        assert_eq!(decision.ability.as_str(), "jab");
        assert_eq!(decision.target, Some(weak.id));
    }

    #[test]
    fn self_target_needs_no_choice() {
        let abilities = vec![option("rest", skirmish_core::AbilityTargeting::SelfOnly, true)];
        let decision = decide(&abilities, &[], &[]).unwrap();
        assert_eq!(decision.target, None);
    }

    #[test]
    fn no_abilities_no_decision() {
        assert_eq!(decide(&[], &[], &[]), None);
    }

    #[test]
    fn plays_a_prototype_battle_to_the_end() {
        let mut battle = BattleController::new(BattleConfig::default().with_seed(21));
        battle
            .begin_battle(
                BattleType::Normal,
                &[prototype::warrior()],
                &[prototype::demon(), prototype::demon()],
                |_| {},
            )
            .unwrap();
        play(&mut battle, 500);
        assert!(battle.outcome().is_some());
    }
}
