//! Speed-ordered, rotating turn queue.
//!
//! The queue holds the ids of every living actor sorted by descending speed.
//! [`TurnOrder::next_actor`] pops the head and re-appends it at the tail, so
//! repeated calls cycle through the round.
//!
//! # Rebuilds
//!
//! [`TurnOrder::update_order`] is called after every turn. It:
//! 1. Drops actors that are dead or no longer on a roster.
//! 2. Re-sorts by current speed. The sort is stable: equal speeds keep the
//!    relative order of the previous ranking, and actors new to the ranking
//!    keep roster order (players first, then enemies).
//! 3. Resumes the rotation at the first actor of the old queue that is still
//!    present, so a rebuild never hands the fastest actor an extra turn.

use std::collections::VecDeque;

use crate::actor::ActorId;
use crate::arena::ActorArena;

/// Rotating turn queue.
///
/// # Example
///
/// ```
/// use skirmish_core::turn_order::TurnOrder;
/// use skirmish_core::arena::ActorArena;
/// use skirmish_core::actor::Side;
/// use skirmish_core::config::BattleConfig;
/// use skirmish_core::definition::{BaseStats, CharacterDefinition};
///
/// let config = BattleConfig::default();
/// let mut arena = ActorArena::new();
/// let slow = arena.spawn(Side::Player, &CharacterDefinition::new("s", "S", BaseStats::new(5, 1, 0, 1)), &config);
/// let fast = arena.spawn(Side::Enemy, &CharacterDefinition::new("f", "F", BaseStats::new(5, 1, 0, 9)), &config);
///
/// let mut order = TurnOrder::new();
/// order.initialize(&arena, &[slow], &[fast]);
/// assert_eq!(order.next_actor(), Some(fast));
/// assert_eq!(order.next_actor(), Some(slow));
/// assert_eq!(order.next_actor(), Some(fast));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOrder {
    /// Rotated queue; the head acts next.
    queue: VecDeque<ActorId>,
    /// Last speed ranking, unrotated. Used for stable tie-breaks.
    ranking: Vec<ActorId>,
}

impl TurnOrder {
    /// Creates an empty order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the initial order from both rosters, fastest first.
    pub fn initialize(&mut self, actors: &ActorArena, players: &[ActorId], enemies: &[ActorId]) {
        self.queue.clear();
        self.ranking.clear();
        self.update_order(actors, players, enemies);
    }

    /// Rebuilds the order from the current rosters.
    pub fn update_order(&mut self, actors: &ActorArena, players: &[ActorId], enemies: &[ActorId]) {
        let mut entries: Vec<(ActorId, i32)> = players
            .iter()
            .chain(enemies)
            .copied()
            .filter(|&id| actors.is_alive(id))
            .filter_map(|id| actors.speed_of(id).map(|speed| (id, speed)))
            .collect();
        entries.dedup_by_key(|(id, _)| *id);

        // Previous rank first, then speed; both sorts are stable.
        entries.sort_by_key(|(id, _)| self.rank_of(*id));
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        let ranking: Vec<ActorId> = entries.into_iter().map(|(id, _)| id).collect();

        let resume_at = self
            .queue
            .iter()
            .find_map(|id| ranking.iter().position(|r| r == id))
            .unwrap_or(0);

        let mut queue: VecDeque<ActorId> = ranking.iter().copied().collect();
        queue.rotate_left(resume_at);

        self.queue = queue;
        self.ranking = ranking;
    }

    fn rank_of(&self, id: ActorId) -> usize {
        self.ranking
            .iter()
            .position(|&r| r == id)
            .unwrap_or(usize::MAX)
    }

    /// Returns the head of the queue and moves it to the tail.
    ///
    /// Returns `None` if the queue is empty.
    pub fn next_actor(&mut self) -> Option<ActorId> {
        let next = self.queue.pop_front()?;
        self.queue.push_back(next);
        Some(next)
    }

    /// Returns the queue as it stands, head first.
    #[must_use]
    pub fn peek_upcoming(&self) -> Vec<ActorId> {
        self.queue.iter().copied().collect()
    }

    /// Returns the number of queued actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nobody is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Side;
    use crate::config::BattleConfig;
    use crate::definition::{BaseStats, CharacterDefinition};

    fn spawn(arena: &mut ActorArena, side: Side, speed: i32) -> ActorId {
        let def = CharacterDefinition::new("x", "X", BaseStats::new(10, 1, 0, speed));
        arena.spawn(side, &def, &BattleConfig::default())
    }

    #[test]
    fn empty_order_yields_none() {
        let mut order = TurnOrder::new();
        order.initialize(&ActorArena::new(), &[], &[]);
        assert!(order.is_empty());
        assert_eq!(order.next_actor(), None);
    }

    #[test]
    fn two_actor_rotation() {
        let mut arena = ActorArena::new();
        let a = spawn(&mut arena, Side::Player, 5);
        let b = spawn(&mut arena, Side::Enemy, 2);
        let mut order = TurnOrder::new();
        order.initialize(&arena, &[a], &[b]);
        assert_eq!(order.next_actor(), Some(a));
        assert_eq!(order.next_actor(), Some(b));
        assert_eq!(order.next_actor(), Some(a));
    }

    #[test]
    fn sorts_by_speed_with_roster_order_on_ties() {
        let mut arena = ActorArena::new();
        let p1 = spawn(&mut arena, Side::Player, 3);
        let p2 = spawn(&mut arena, Side::Player, 7);
        let e1 = spawn(&mut arena, Side::Enemy, 3);
        let e2 = spawn(&mut arena, Side::Enemy, 9);
        let mut order = TurnOrder::new();
        order.initialize(&arena, &[p1, p2], &[e1, e2]);
        assert_eq!(order.peek_upcoming(), vec![e2, p2, p1, e1]);
    }

    #[test]
    fn rebuild_keeps_rotation_cursor() {
        let mut arena = ActorArena::new();
        let fast = spawn(&mut arena, Side::Player, 9);
        let mid = spawn(&mut arena, Side::Enemy, 5);
        let slow = spawn(&mut arena, Side::Enemy, 1);
        let mut order = TurnOrder::new();
        order.initialize(&arena, &[fast], &[mid, slow]);

        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(order.next_actor().unwrap());
            order.update_order(&arena, &[fast], &[mid, slow]);
        }
        assert_eq!(seen, vec![fast, mid, slow, fast, mid, slow]);
    }

    #[test]
    fn rebuild_drops_the_dead() {
        let mut arena = ActorArena::new();
        let a = spawn(&mut arena, Side::Player, 9);
        let b = spawn(&mut arena, Side::Enemy, 5);
        let c = spawn(&mut arena, Side::Enemy, 1);
        let mut order = TurnOrder::new();
        order.initialize(&arena, &[a], &[b, c]);

        assert_eq!(order.next_actor(), Some(a));
        arena.get_mut(b).unwrap().take_damage(100);
        order.update_order(&arena, &[a], &[b, c]);

        assert_eq!(order.peek_upcoming(), vec![c, a]);
    }

    #[test]
    fn ties_alternate_across_rebuilds() {
        let mut arena = ActorArena::new();
        let a = spawn(&mut arena, Side::Player, 4);
        let b = spawn(&mut arena, Side::Enemy, 4);
        let mut order = TurnOrder::new();
        order.initialize(&arena, &[a], &[b]);

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(order.next_actor().unwrap());
            order.update_order(&arena, &[a], &[b]);
        }
        assert_eq!(seen, vec![a, b, a, b]);
    }

    #[test]
    fn speed_change_takes_effect_on_rebuild() {
        let mut arena = ActorArena::new();
        let a = spawn(&mut arena, Side::Player, 8);
        let b = spawn(&mut arena, Side::Player, 6);
        let c = spawn(&mut arena, Side::Enemy, 4);
        let d = spawn(&mut arena, Side::Enemy, 2);
        let mut order = TurnOrder::new();
        order.initialize(&arena, &[a, b], &[c, d]);
        assert_eq!(order.peek_upcoming(), vec![a, b, c, d]);

        arena.get_mut(d).unwrap().adjust_speed(5);
        order.update_order(&arena, &[a, b], &[c, d]);
        assert_eq!(order.peek_upcoming(), vec![a, d, b, c]);
    }
}
