//! Ability resolution.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use super::{deal_damage, roll, ActionResolver};
use crate::actor::{ActorId, StatusEffect};
use crate::arena::ActorArena;
use crate::definition::{Ability, AbilityEffect, AbilityTargeting};

impl ActionResolver {
    /// Resolves `ability` used by `source`.
    ///
    /// `allies` and `enemies` are rosters from the source's point of view.
    /// `chosen` is the player's pick for single-target modes; it is ignored
    /// by modes that resolve their own targets.
    ///
    /// After the effect, every listed status is applied to each affected
    /// actor still alive, then the cooldown is applied if positive. Returns
    /// the affected actors. A dead source resolves nothing and starts no
    /// cooldown.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve_ability<R: Rng + ?Sized>(
        &self,
        ability: &Ability,
        actors: &mut ActorArena,
        source: ActorId,
        allies: &[ActorId],
        enemies: &[ActorId],
        chosen: Option<ActorId>,
        rng: &mut R,
    ) -> Vec<ActorId> {
        if !actors.is_alive(source) {
            return Vec::new();
        }
        debug!(
            %source,
            ability = %ability.id,
            allies = allies.len(),
            enemies = enemies.len(),
            "resolving ability"
        );

        let affected = match ability.effect {
            AbilityEffect::AreaStrike { min, max } => {
                let targets = actors.living(enemies);
                for &target in &targets {
                    let amount = roll(rng, min, max);
                    let dealt = deal_damage(actors, target, amount);
                    trace!(%source, %target, amount, dealt, "area strike");
                }
                targets
            }
            AbilityEffect::BlockAndRecover { heal_next_turn } => {
                if let Some(actor) = actors.get_mut(source) {
                    actor.apply_block_all_until_next_turn(heal_next_turn);
                }
                vec![source]
            }
            AbilityEffect::ApplyMark => {
                let targets = resolve_targets(actors, ability.targeting, source, allies, enemies, chosen, rng);
                for &target in &targets {
                    if let Some(actor) = actors.get_mut(target) {
                        actor.add_mark();
                    }
                }
                targets
            }
            AbilityEffect::ConsumeMarkStrike {
                marked_min,
                marked_max,
                unmarked_min,
                unmarked_max,
            } => {
                let targets = resolve_targets(actors, ability.targeting, source, allies, enemies, chosen, rng);
                for &target in &targets {
                    let marked = actors.get_mut(target).is_some_and(|t| t.consume_mark());
                    let amount = if marked {
                        roll(rng, marked_min, marked_max)
                    } else {
                        roll(rng, unmarked_min, unmarked_max)
                    };
                    let dealt = deal_damage(actors, target, amount);
                    trace!(%source, %target, marked, amount, dealt, "mark strike");
                }
                targets
            }
            AbilityEffect::BasicAttack => {
                let targets = resolve_targets(actors, ability.targeting, source, allies, enemies, chosen, rng);
                for &target in &targets {
                    self.basic_attack(actors, source, target);
                }
                targets
            }
        };

        if ability.status_duration > 0 {
            for &target in &affected {
                let Some(actor) = actors.get_mut(target) else {
                    continue;
                };
                for &kind in &ability.applies_statuses {
                    actor.apply_status(StatusEffect::new(kind, ability.status_duration, 1));
                }
            }
        }

        if ability.cooldown_turns > 0 {
            if let Some(actor) = actors.get_mut(source) {
                actor.apply_cooldown(&ability.id, ability.cooldown_turns);
            }
        }

        affected
    }
}

/// Living targets for an effect that follows the ability's targeting mode.
fn resolve_targets<R: Rng + ?Sized>(
    actors: &ActorArena,
    targeting: AbilityTargeting,
    source: ActorId,
    allies: &[ActorId],
    enemies: &[ActorId],
    chosen: Option<ActorId>,
    rng: &mut R,
) -> Vec<ActorId> {
    match targeting {
        AbilityTargeting::SelfOnly => vec![source],
        AbilityTargeting::AllEnemies => actors.living(enemies),
        AbilityTargeting::AllAllies => actors.living(allies),
        AbilityTargeting::RandomEnemy => actors
            .living(enemies)
            .choose(rng)
            .copied()
            .into_iter()
            .collect(),
        AbilityTargeting::SingleEnemy | AbilityTargeting::SingleAlly => chosen
            .filter(|&id| actors.is_alive(id))
            .into_iter()
            .collect(),
    }
}
