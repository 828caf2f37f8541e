//! Weighted enemy policy.
//!
//! Each enemy turn rolls one of three moves from a [`WeightedTable`] built
//! out of [`EnemyAiConfig`]:
//!
//! | Move | Default weight | Effect |
//! |------|----------------|--------|
//! | [`EnemyMove::Drain`] | 0.10 | hit a random opponent, heal by the HP it lost |
//! | [`EnemyMove::GuardAndPoke`] | 0.50 | guard self, then hit a random opponent |
//! | [`EnemyMove::DebuffStrike`] | rest | hit a random opponent and weaken its next attack |

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{deal_damage, ActionResolver};
use crate::actor::ActorId;
use crate::arena::ActorArena;
use crate::config::EnemyAiConfig;
use crate::weighted::WeightedTable;

/// The three enemy moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyMove {
    /// Life drain.
    Drain,
    /// Self-guard followed by a small hit.
    GuardAndPoke,
    /// Small hit plus an attack debuff on the target.
    DebuffStrike,
}

pub(super) fn move_table(ai: &EnemyAiConfig) -> WeightedTable<EnemyMove> {
    WeightedTable::new()
        .with(EnemyMove::Drain, ai.drain_chance)
        .with(EnemyMove::GuardAndPoke, ai.guard_chance)
        .with(EnemyMove::DebuffStrike, ai.fallback_chance())
}

impl ActionResolver {
    /// Runs one enemy turn for `actor`.
    ///
    /// Returns the move taken, or `None` if the actor is dead or no opponent
    /// is alive.
    pub fn enemy_act<R: Rng + ?Sized>(
        &self,
        actors: &mut ActorArena,
        actor: ActorId,
        own_team: &[ActorId],
        opposing_team: &[ActorId],
        rng: &mut R,
    ) -> Option<EnemyMove> {
        if !actors.is_alive(actor) {
            return None;
        }
        let targets = actors.living(opposing_team);
        if targets.is_empty() {
            return None;
        }

        let chosen = *self.ai_moves.choose(rng)?;
        let target = *targets.choose(rng)?;
        debug!(
            %actor,
            %target,
            ?chosen,
            allies = own_team.len(),
            "enemy acts"
        );

        match chosen {
            EnemyMove::Drain => {
                let dealt = deal_damage(actors, target, self.ai.drain_damage);
                if dealt > 0 {
                    if let Some(me) = actors.get_mut(actor) {
                        me.heal(dealt);
                    }
                }
                trace!(%actor, %target, dealt, "drain");
            }
            EnemyMove::GuardAndPoke => {
                if let Some(me) = actors.get_mut(actor) {
                    me.apply_guard(self.ai.guard_amount, self.ai.guard_turns);
                }
                let dealt = deal_damage(actors, target, self.ai.poke_damage);
                trace!(%actor, %target, dealt, "guard and poke");
            }
            EnemyMove::DebuffStrike => {
                let dealt = deal_damage(actors, target, self.ai.debuff_damage);
                if let Some(victim) = actors.get_mut(target) {
                    victim.add_next_attack_modifier(self.ai.attack_debuff);
                }
                trace!(%actor, %target, dealt, "debuff strike");
            }
        }
        Some(chosen)
    }
}
