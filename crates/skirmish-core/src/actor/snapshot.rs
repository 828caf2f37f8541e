//! Read-only actor copies handed to presentation collaborators.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ActorId, CombatActor, Side, StatusEffect};

/// A detached copy of an actor's visible state.
///
/// Snapshots are what prompts and turn events carry; mutating one has no
/// effect on the encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// Actor id.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Roster side.
    pub side: Side,
    /// Current hit points.
    pub hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Attack stat.
    pub attack: i32,
    /// Defense stat.
    pub defense: i32,
    /// Speed stat.
    pub speed: i32,
    /// Active guard amount (zero when expired).
    pub guard: i32,
    /// Full block active.
    pub blocking: bool,
    /// Mark stacks.
    pub marks: u32,
    /// Cooldowns by ability id; zero entries omitted.
    pub cooldowns: BTreeMap<String, u32>,
    /// Statuses present.
    pub statuses: Vec<StatusEffect>,
}

impl ActorSnapshot {
    /// Captures the current state of `actor`.
    #[must_use]
    pub fn of(actor: &CombatActor) -> Self {
        Self {
            id: actor.id(),
            name: actor.name().to_string(),
            side: actor.side(),
            hp: actor.current_hp(),
            max_hp: actor.max_hp(),
            attack: actor.attack(),
            defense: actor.defense(),
            speed: actor.speed(),
            guard: if actor.is_guarding() {
                actor.guard_amount()
            } else {
                0
            },
            blocking: actor.is_blocking_all(),
            marks: actor.mark_stacks(),
            cooldowns: actor
                .cooldowns()
                .iter()
                .filter(|(_, turns)| **turns > 0)
                .map(|(id, turns)| (id.to_string(), *turns))
                .collect(),
            statuses: actor.statuses().iter().copied().collect(),
        }
    }

    /// Returns true if the actor was alive when captured.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
