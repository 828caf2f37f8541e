//! Actor storage for one encounter.
//!
//! The [`ActorArena`] owns every [`CombatActor`] for the lifetime of an
//! encounter. Rosters and the turn queue only hold [`ActorId`]s, so an actor
//! can be mutated through the arena while lists of ids are borrowed
//! elsewhere.
//!
//! Actors are stored in a `BTreeMap` keyed by monotonically assigned ids,
//! which makes iteration order equal to spawn order. Dead actors stay in
//! the arena so their final state can still be inspected; they simply drop
//! out of the rosters.

use std::collections::BTreeMap;

use tracing::debug;

use crate::actor::{ActorId, CombatActor, Side};
use crate::config::BattleConfig;
use crate::definition::CharacterDefinition;

/// Container for the actors of an encounter.
///
/// # Example
///
/// ```
/// use skirmish_core::arena::ActorArena;
/// use skirmish_core::actor::Side;
/// use skirmish_core::config::BattleConfig;
/// use skirmish_core::definition::{BaseStats, CharacterDefinition};
///
/// let config = BattleConfig::default();
/// let def = CharacterDefinition::new("imp", "Imp", BaseStats::new(15, 2, 0, 2));
///
/// let mut arena = ActorArena::new();
/// let a = arena.spawn(Side::Enemy, &def, &config);
/// let b = arena.spawn(Side::Enemy, &def, &config);
///
/// let ids: Vec<_> = arena.ids_sorted().collect();
/// assert_eq!(ids, vec![a, b]);
/// assert!(arena.is_alive(a));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ActorArena {
    /// Monotonically increasing id counter.
    next_id: u64,
    actors: BTreeMap<ActorId, CombatActor>,
}

impl ActorArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            actors: BTreeMap::new(),
        }
    }

    /// Builds an actor from a definition and stores it.
    pub fn spawn(
        &mut self,
        side: Side,
        def: &CharacterDefinition,
        config: &BattleConfig,
    ) -> ActorId {
        let id = ActorId::new(self.next_id);
        self.next_id += 1;
        self.actors.insert(id, CombatActor::new(id, side, def, config));
        id
    }

    /// Returns an actor by id.
    #[must_use]
    pub fn get(&self, id: ActorId) -> Option<&CombatActor> {
        self.actors.get(&id)
    }

    /// Returns a mutable actor by id.
    #[must_use]
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut CombatActor> {
        self.actors.get_mut(&id)
    }

    /// Returns true if the id exists and the actor has HP left.
    #[must_use]
    pub fn is_alive(&self, id: ActorId) -> bool {
        self.actors.get(&id).is_some_and(CombatActor::is_alive)
    }

    /// Returns the actor's speed, if it exists.
    #[must_use]
    pub fn speed_of(&self, id: ActorId) -> Option<i32> {
        self.actors.get(&id).map(CombatActor::speed)
    }

    /// Filters `roster` down to living actors, keeping order.
    #[must_use]
    pub fn living(&self, roster: &[ActorId]) -> Vec<ActorId> {
        roster.iter().copied().filter(|&id| self.is_alive(id)).collect()
    }

    /// Returns true if any actor in `roster` is alive.
    #[must_use]
    pub fn any_alive(&self, roster: &[ActorId]) -> bool {
        roster.iter().any(|&id| self.is_alive(id))
    }

    /// Iterates over ids in spawn order.
    pub fn ids_sorted(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.actors.keys().copied()
    }

    /// Iterates over actors in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &CombatActor> + '_ {
        self.actors.values()
    }

    /// Returns the number of actors, dead ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Returns true if no actor was ever spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

/// Builds up to `config.max_squad_size` actors from `definitions`, in order.
///
/// Returns the new ids in roster order.
pub fn build_squad(
    definitions: &[CharacterDefinition],
    config: &BattleConfig,
    side: Side,
    arena: &mut ActorArena,
) -> Vec<ActorId> {
    if definitions.len() > config.max_squad_size {
        debug!(
            %side,
            supplied = definitions.len(),
            max = config.max_squad_size,
            "squad truncated"
        );
    }
    definitions
        .iter()
        .take(config.max_squad_size)
        .map(|def| arena.spawn(side, def, config))
        .collect()
}
