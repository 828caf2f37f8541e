//! Events emitted to presentation collaborators.
//!
//! Events carry [`ActorSnapshot`]s and ids, never references into the
//! encounter, so listeners can only read state. Listeners implement
//! [`BattleObserver`]; any `FnMut(&BattleEvent)` closure already does.

use serde::{Deserialize, Serialize};

use super::phase::{BattleOutcome, BattleType};
use crate::actor::{ActorId, ActorSnapshot};
use crate::definition::Ability;

/// An equipped ability as offered in an action prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityOption {
    /// The ability record.
    pub ability: Ability,
    /// False while on cooldown.
    pub ready: bool,
    /// Turns left on the cooldown.
    pub cooldown_remaining: u32,
}

/// Why an actor's turn passed without an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// A stun or freeze.
    Incapacitated,
    /// Start-of-turn damage killed the actor.
    DiedAtTurnStart,
    /// The player picked an ability that is still cooling down.
    AbilityOnCooldown,
    /// A player actor with nothing equipped has no action to choose.
    NoAbilities,
}

/// Notifications from the battle controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// `begin_battle` succeeded.
    BattleStarted {
        /// Encounter flavor.
        battle_type: BattleType,
        /// Player roster at the start.
        players: Vec<ActorSnapshot>,
        /// Enemy roster at the start.
        enemies: Vec<ActorSnapshot>,
    },
    /// The turn order was built or rebuilt.
    TurnOrderUpdated {
        /// Queue, head first.
        upcoming: Vec<ActorId>,
    },
    /// A new turn began.
    TurnCounterUpdated {
        /// One-based turn number.
        turn: u32,
        /// The acting actor after start-of-turn upkeep.
        current: ActorSnapshot,
        /// Queue after the actor was rotated to the tail.
        upcoming: Vec<ActorId>,
    },
    /// A player actor needs an ability.
    PlayerActionPrompt {
        /// The acting actor.
        actor: ActorSnapshot,
        /// Equipped abilities with readiness.
        abilities: Vec<AbilityOption>,
        /// Living enemies.
        enemy_candidates: Vec<ActorSnapshot>,
        /// Living allies, the actor included.
        ally_candidates: Vec<ActorSnapshot>,
    },
    /// The chosen ability needs a target.
    TargetPrompt {
        /// The chosen ability.
        ability: Ability,
        /// Valid targets.
        candidates: Vec<ActorSnapshot>,
    },
    /// An actor's turn passed with no action.
    TurnSkipped {
        /// The actor.
        actor: ActorId,
        /// Why.
        reason: SkipReason,
    },
    /// The encounter ended.
    BattleFinished {
        /// Outcome.
        outcome: BattleOutcome,
        /// Same as `outcome.player_won()`.
        player_won: bool,
    },
}

/// Receives [`BattleEvent`]s.
///
/// Observers must not assume any ordering relative to other observers.
pub trait BattleObserver {
    /// Called once per event, in emission order.
    fn on_event(&mut self, event: &BattleEvent);
}

impl<F> BattleObserver for F
where
    F: FnMut(&BattleEvent),
{
    fn on_event(&mut self, event: &BattleEvent) {
        self(event);
    }
}
