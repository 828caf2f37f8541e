//! Combat actors: runtime instances of characters in one encounter.
//!
//! - [`ActorId`]: identifier assigned by the [`ActorArena`](crate::arena::ActorArena)
//! - [`Side`]: which roster the actor belongs to
//! - [`CombatActor`]: stats, equipped abilities, cooldowns and combat flags
//!
//! # Damage mitigation
//!
//! Every hit goes through [`CombatActor::take_damage`], which applies, in
//! order: full block, then defense, then guard. With no block,
//!
//! ```text
//! final = max(0, max(0, amount - defense) - (guard active ? guard_amount : 0))
//! ```
//!
//! # Example
//!
//! ```
//! use skirmish_core::actor::{ActorId, CombatActor, Side};
//! use skirmish_core::config::BattleConfig;
//! use skirmish_core::definition::{BaseStats, CharacterDefinition};
//!
//! let def = CharacterDefinition::new("imp", "Imp", BaseStats::new(15, 2, 1, 2));
//! let mut imp = CombatActor::new(ActorId::new(0), Side::Enemy, &def, &BattleConfig::default());
//!
//! imp.take_damage(4);
//! assert_eq!(imp.current_hp(), 12);
//! ```

pub mod snapshot;
pub mod status;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

use crate::config::BattleConfig;
use crate::definition::{
    Ability, AbilityId, BaseStats, CharacterDefinition, Passive, PassiveKind, PermanentItem,
};

pub use snapshot::ActorSnapshot;
pub use status::{StatusContainer, StatusEffect, StatusKind};

/// Identifier of an actor within one encounter.
///
/// Ordered by numeric value, which is also spawn order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// Creates an id from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// The roster an actor fights for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Controlled through player input.
    Player,
    /// Controlled by the enemy policy.
    Enemy,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Enemy => write!(f, "enemy"),
        }
    }
}

/// A character taking part in the current encounter.
///
/// Holds a private copy of the definition's stats; the definition itself is
/// never touched. Invariant: `0 <= current_hp <= max_hp`.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatActor {
    id: ActorId,
    side: Side,
    definition_id: String,
    name: String,
    stats: BaseStats,
    equipped: Vec<Ability>,
    passive: Option<Passive>,
    assigned_items: Vec<PermanentItem>,
    active_items: Vec<PermanentItem>,
    cooldowns: BTreeMap<AbilityId, u32>,
    guard_amount: i32,
    guard_turns_remaining: u32,
    block_all_damage: bool,
    pending_heal_next_turn: i32,
    next_attack_modifier: i32,
    mark_stacks: u32,
    statuses: StatusContainer,
}

impl CombatActor {
    /// Builds an actor from a definition.
    ///
    /// Equips the first `max_equipped_abilities` abilities, selects the first
    /// passive, assigns up to three items and activates the first
    /// `max_active_items` of them.
    #[must_use]
    pub fn new(id: ActorId, side: Side, def: &CharacterDefinition, config: &BattleConfig) -> Self {
        let mut stats = def.base_stats.clone();
        stats.max_hp = stats.max_hp.max(0);
        stats.current_hp = stats.current_hp.clamp(0, stats.max_hp);

        let assigned_items: Vec<_> = def
            .items
            .iter()
            .take(crate::definition::MAX_DEFINED_ITEMS)
            .cloned()
            .collect();
        let active_items = assigned_items
            .iter()
            .take(config.max_active_items)
            .cloned()
            .collect();

        Self {
            id,
            side,
            definition_id: def.id.clone(),
            name: def.name.clone(),
            stats,
            equipped: def
                .abilities
                .iter()
                .take(config.max_equipped_abilities)
                .cloned()
                .collect(),
            passive: def.passives.first().cloned(),
            assigned_items,
            active_items,
            cooldowns: BTreeMap::new(),
            guard_amount: 0,
            guard_turns_remaining: 0,
            block_all_damage: false,
            pending_heal_next_turn: 0,
            next_attack_modifier: 0,
            mark_stacks: 0,
            statuses: StatusContainer::new(),
        }
    }

    // =========================================================================
    // Identity and stats
    // =========================================================================

    /// Returns the actor id.
    #[must_use]
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the side.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns the id of the definition this actor was built from.
    #[must_use]
    pub fn definition_id(&self) -> &str {
        &self.definition_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the actor's private stats.
    #[must_use]
    pub fn stats(&self) -> &BaseStats {
        &self.stats
    }

    /// Current hit points.
    #[must_use]
    pub fn current_hp(&self) -> i32 {
        self.stats.current_hp
    }

    /// Maximum hit points.
    #[must_use]
    pub fn max_hp(&self) -> i32 {
        self.stats.max_hp
    }

    /// Attack stat.
    #[must_use]
    pub fn attack(&self) -> i32 {
        self.stats.attack
    }

    /// Defense stat.
    #[must_use]
    pub fn defense(&self) -> i32 {
        self.stats.defense
    }

    /// Speed stat.
    #[must_use]
    pub fn speed(&self) -> i32 {
        self.stats.speed
    }

    /// Changes speed; the new value is used from the next turn-order rebuild.
    pub fn adjust_speed(&mut self, delta: i32) {
        self.stats.speed = self.stats.speed.saturating_add(delta);
    }

    /// Returns true while `current_hp > 0`.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.stats.current_hp > 0
    }

    // =========================================================================
    // Loadout
    // =========================================================================

    /// Equipped abilities in equip order.
    #[must_use]
    pub fn equipped_abilities(&self) -> &[Ability] {
        &self.equipped
    }

    /// Looks up an equipped ability by id.
    #[must_use]
    pub fn equipped_ability(&self, id: &AbilityId) -> Option<&Ability> {
        self.equipped.iter().find(|a| &a.id == id)
    }

    /// The selected passive, if any.
    #[must_use]
    pub fn selected_passive(&self) -> Option<&Passive> {
        self.passive.as_ref()
    }

    /// Items assigned for this encounter.
    #[must_use]
    pub fn assigned_items(&self) -> &[PermanentItem] {
        &self.assigned_items
    }

    /// Items currently active.
    #[must_use]
    pub fn active_items(&self) -> &[PermanentItem] {
        &self.active_items
    }

    /// Replaces the active item in `active_slot` with assigned item
    /// `assigned_index`.
    ///
    /// Returns false (and changes nothing) for out-of-range indices or when
    /// that item is already active.
    pub fn swap_active_item(&mut self, active_slot: usize, assigned_index: usize) -> bool {
        let Some(item) = self.assigned_items.get(assigned_index) else {
            return false;
        };
        if active_slot >= self.active_items.len() || self.active_items.contains(item) {
            return false;
        }
        self.active_items[active_slot] = item.clone();
        true
    }

    // =========================================================================
    // Turn lifecycle
    // =========================================================================

    /// Start-of-turn upkeep.
    ///
    /// 1. Applies and clears the pending heal.
    /// 2. Heals from a regeneration passive (at least 1).
    /// 3. Clears the full block, which lasts until the actor's next turn.
    /// 4. Ticks damage-over-time statuses.
    pub fn begin_turn(&mut self) {
        if self.pending_heal_next_turn > 0 {
            let amount = self.pending_heal_next_turn;
            self.pending_heal_next_turn = 0;
            self.heal(amount);
        }

        if let Some(PassiveKind::Regeneration { power }) = self.passive.as_ref().map(|p| p.kind) {
            self.heal(power.max(1));
        }

        self.block_all_damage = false;

        let periodic = self.statuses.periodic_damage();
        if periodic > 0 {
            let amount = i32::try_from(periodic).unwrap_or(i32::MAX);
            self.take_true_damage(amount);
        }
    }

    /// End-of-turn upkeep: ticks cooldowns, guard and statuses down.
    pub fn end_turn(&mut self) {
        for turns in self.cooldowns.values_mut() {
            *turns = turns.saturating_sub(1);
        }

        if self.guard_turns_remaining > 0 {
            self.guard_turns_remaining -= 1;
            if self.guard_turns_remaining == 0 {
                self.guard_amount = 0;
            }
        }

        self.statuses.decay();
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Applies an incoming hit through block, defense and guard.
    ///
    /// Returns the HP actually lost. Does nothing to a dead actor.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if !self.is_alive() || self.block_all_damage {
            return 0;
        }

        let mut damage = amount.saturating_sub(self.stats.defense).max(0);
        if self.is_guarding() {
            damage = damage.saturating_sub(self.guard_amount).max(0);
        }
        self.lose_hp(damage)
    }

    /// Applies damage that ignores defense and guard but not a full block.
    ///
    /// Returns the HP actually lost.
    pub fn take_true_damage(&mut self, amount: i32) -> i32 {
        if !self.is_alive() || self.block_all_damage {
            return 0;
        }
        self.lose_hp(amount.max(0))
    }

    fn lose_hp(&mut self, damage: i32) -> i32 {
        let before = self.stats.current_hp;
        self.stats.current_hp = before.saturating_sub(damage).max(0);
        let lost = before - self.stats.current_hp;
        trace!(actor = %self.id, damage, hp = self.stats.current_hp, "hp lost");
        lost
    }

    /// Heals up to max HP. Negative amounts count as zero; the dead stay dead.
    ///
    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.stats.current_hp;
        self.stats.current_hp = before
            .saturating_add(amount.max(0))
            .min(self.stats.max_hp);
        self.stats.current_hp - before
    }

    // =========================================================================
    // Cooldowns
    // =========================================================================

    /// Sets a cooldown to `max(current, turns)`; never shortens one.
    pub fn apply_cooldown(&mut self, id: &AbilityId, turns: u32) {
        let entry = self.cooldowns.entry(id.clone()).or_insert(0);
        *entry = (*entry).max(turns);
    }

    /// Returns true if the ability has turns left on its cooldown.
    #[must_use]
    pub fn is_on_cooldown(&self, id: &AbilityId) -> bool {
        self.cooldown_remaining(id) > 0
    }

    /// Turns left on a cooldown; zero when absent.
    #[must_use]
    pub fn cooldown_remaining(&self, id: &AbilityId) -> u32 {
        self.cooldowns.get(id).copied().unwrap_or(0)
    }

    /// The full cooldown table.
    #[must_use]
    pub fn cooldowns(&self) -> &BTreeMap<AbilityId, u32> {
        &self.cooldowns
    }

    // =========================================================================
    // Guard, block, heal-over-turn
    // =========================================================================

    /// Applies a guard; amount and duration each keep the larger value.
    pub fn apply_guard(&mut self, amount: i32, turns: u32) {
        self.guard_amount = self.guard_amount.max(amount);
        self.guard_turns_remaining = self.guard_turns_remaining.max(turns);
    }

    /// Current guard amount.
    #[must_use]
    pub fn guard_amount(&self) -> i32 {
        self.guard_amount
    }

    /// Turns of guard left.
    #[must_use]
    pub fn guard_turns_remaining(&self) -> u32 {
        self.guard_turns_remaining
    }

    /// Returns true if guard reduces incoming hits right now.
    #[must_use]
    pub fn is_guarding(&self) -> bool {
        self.guard_amount > 0 && self.guard_turns_remaining > 0
    }

    /// Blocks all damage until this actor's next turn and queues a heal for
    /// its start. The queued heal keeps the larger of old and new.
    pub fn apply_block_all_until_next_turn(&mut self, heal_next_turn: i32) {
        self.block_all_damage = true;
        self.pending_heal_next_turn = self.pending_heal_next_turn.max(heal_next_turn);
    }

    /// Returns true while every hit is negated.
    #[must_use]
    pub fn is_blocking_all(&self) -> bool {
        self.block_all_damage
    }

    /// Heal queued for the start of the next turn.
    #[must_use]
    pub fn pending_heal_next_turn(&self) -> i32 {
        self.pending_heal_next_turn
    }

    // =========================================================================
    // Attack modifier
    // =========================================================================

    /// Adds to the modifier on the next outgoing basic attack.
    pub fn add_next_attack_modifier(&mut self, delta: i32) {
        self.next_attack_modifier = self.next_attack_modifier.saturating_add(delta);
    }

    /// Returns the pending modifier and resets it to zero.
    pub fn consume_next_attack_modifier(&mut self) -> i32 {
        std::mem::take(&mut self.next_attack_modifier)
    }

    /// Pending modifier, without consuming it.
    #[must_use]
    pub fn next_attack_modifier(&self) -> i32 {
        self.next_attack_modifier
    }

    // =========================================================================
    // Marks and statuses
    // =========================================================================

    /// Mark stacks on this actor.
    #[must_use]
    pub fn mark_stacks(&self) -> u32 {
        self.mark_stacks
    }

    /// Adds one mark stack.
    pub fn add_mark(&mut self) {
        self.mark_stacks = self.mark_stacks.saturating_add(1);
    }

    /// Removes one mark stack; returns false if there was none.
    pub fn consume_mark(&mut self) -> bool {
        if self.mark_stacks == 0 {
            return false;
        }
        self.mark_stacks -= 1;
        true
    }

    /// Statuses on this actor.
    #[must_use]
    pub fn statuses(&self) -> &StatusContainer {
        &self.statuses
    }

    /// Applies a status. The dead collect no statuses.
    pub fn apply_status(&mut self, effect: StatusEffect) {
        if self.is_alive() {
            self.statuses.add(effect);
        }
    }

    /// Returns true if a status costs this actor its action.
    #[must_use]
    pub fn is_incapacitated(&self) -> bool {
        self.statuses.is_incapacitating()
    }

    /// Read-only copy for presentation.
    #[must_use]
    pub fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot::of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{AbilityEffect, AbilityTargeting};

    fn actor_with(stats: BaseStats) -> CombatActor {
        let def = CharacterDefinition::new("test", "Test", stats);
        CombatActor::new(ActorId::new(1), Side::Player, &def, &BattleConfig::default())
    }

    fn dummy(hp: i32, defense: i32) -> CombatActor {
        actor_with(BaseStats::new(hp, 3, defense, 5))
    }

    fn ability(id: &str) -> Ability {
        Ability::new(id, id, AbilityTargeting::SingleEnemy, AbilityEffect::BasicAttack)
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn equips_first_four_abilities() {
            let mut def = CharacterDefinition::new("w", "W", BaseStats::new(10, 1, 0, 1));
            for i in 0..6 {
                def = def.with_ability(ability(&format!("a{i}")));
            }
            let actor = CombatActor::new(ActorId::new(0), Side::Player, &def, &BattleConfig::default());
            let ids: Vec<_> = actor
                .equipped_abilities()
                .iter()
                .map(|a| a.id.as_str().to_string())
                .collect();
            assert_eq!(ids, vec!["a0", "a1", "a2", "a3"]);
        }

        #[test]
        fn selects_first_passive_and_two_items() {
            let def = CharacterDefinition::new("w", "W", BaseStats::new(10, 1, 0, 1))
                .with_passive(Passive::new("regen", "Regen", PassiveKind::Regeneration { power: 2 }))
                .with_passive(Passive::new("other", "Other", PassiveKind::Inert))
                .with_item(PermanentItem { id: "i0".into(), ..PermanentItem::default() })
                .with_item(PermanentItem { id: "i1".into(), ..PermanentItem::default() })
                .with_item(PermanentItem { id: "i2".into(), ..PermanentItem::default() });
            let actor = CombatActor::new(ActorId::new(0), Side::Player, &def, &BattleConfig::default());
            assert_eq!(actor.selected_passive().map(|p| p.id.as_str()), Some("regen"));
            assert_eq!(actor.assigned_items().len(), 3);
            assert_eq!(actor.active_items().len(), 2);
        }

        #[test]
        fn clones_stats_and_clamps_hp() {
            let mut stats = BaseStats::new(15, 3, 0, 5);
            stats.current_hp = 40;
            let def = CharacterDefinition::new("w", "W", stats);
            let mut actor = CombatActor::new(ActorId::new(0), Side::Enemy, &def, &BattleConfig::default());
            assert_eq!(actor.current_hp(), 15);
            actor.take_damage(5);
            assert_eq!(def.base_stats.current_hp, 40);
        }
    }

    mod damage_tests {
        use super::*;

        #[test]
        fn defense_reduces_damage() {
            let mut actor = dummy(20, 2);
            assert_eq!(actor.take_damage(5), 3);
            assert_eq!(actor.current_hp(), 17);
        }

        #[test]
        fn guard_applies_after_defense() {
            let mut actor = dummy(20, 1);
            actor.apply_guard(2, 1);
            assert_eq!(actor.take_damage(5), 2);
        }

        #[test]
        fn block_wins_over_everything() {
            let mut actor = dummy(20, 0);
            actor.apply_guard(1, 3);
            actor.apply_block_all_until_next_turn(0);
            assert_eq!(actor.take_damage(100), 0);
            assert_eq!(actor.take_true_damage(100), 0);
            assert_eq!(actor.current_hp(), 20);
        }

        #[test]
        fn hp_floors_at_zero_and_dead_ignore_damage() {
            let mut actor = dummy(5, 0);
            assert_eq!(actor.take_damage(9), 5);
            assert_eq!(actor.current_hp(), 0);
            assert!(!actor.is_alive());
            assert_eq!(actor.take_damage(3), 0);
            assert_eq!(actor.heal(3), 0);
            assert_eq!(actor.current_hp(), 0);
        }

        #[test]
        fn heal_caps_and_ignores_negatives() {
            let mut actor = dummy(10, 0);
            actor.take_damage(4);
            assert_eq!(actor.heal(-5), 0);
            assert_eq!(actor.heal(10), 4);
            assert_eq!(actor.current_hp(), 10);
        }

        #[test]
        fn true_damage_ignores_defense_and_guard() {
            let mut actor = dummy(10, 4);
            actor.apply_guard(3, 2);
            assert_eq!(actor.take_true_damage(2), 2);
        }
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn block_then_heal_cycle() {
            let mut actor = dummy(30, 0);
            actor.take_damage(10);
            actor.apply_block_all_until_next_turn(5);
            assert!(actor.is_blocking_all());
            assert_eq!(actor.pending_heal_next_turn(), 5);

            actor.take_damage(100);
            assert_eq!(actor.current_hp(), 20);

            actor.begin_turn();
            assert_eq!(actor.current_hp(), 25);
            assert!(!actor.is_blocking_all());
            assert_eq!(actor.pending_heal_next_turn(), 0);
        }

        #[test]
        fn pending_heal_keeps_larger() {
            let mut actor = dummy(30, 0);
            actor.apply_block_all_until_next_turn(5);
            actor.apply_block_all_until_next_turn(3);
            assert_eq!(actor.pending_heal_next_turn(), 5);
        }

        #[test]
        fn regeneration_heals_at_least_one() {
            let def = CharacterDefinition::new("w", "W", BaseStats::new(10, 1, 0, 1))
                .with_passive(Passive::new("regen", "Regen", PassiveKind::Regeneration { power: 0 }));
            let mut actor = CombatActor::new(ActorId::new(0), Side::Player, &def, &BattleConfig::default());
            actor.take_damage(5);
            actor.begin_turn();
            assert_eq!(actor.current_hp(), 6);
        }

        #[test]
        fn guard_expires_with_turns() {
            let mut actor = dummy(10, 0);
            actor.apply_guard(2, 2);
            actor.apply_guard(1, 1);
            assert_eq!(actor.guard_amount(), 2);
            assert_eq!(actor.guard_turns_remaining(), 2);
            actor.end_turn();
            assert!(actor.is_guarding());
            actor.end_turn();
            assert!(!actor.is_guarding());
            assert_eq!(actor.guard_amount(), 0);
        }

        #[test]
        fn cooldowns_tick_and_floor() {
            let mut actor = dummy(10, 0);
            let id = AbilityId::new("x");
            actor.apply_cooldown(&id, 1);
            actor.end_turn();
            actor.end_turn();
            assert_eq!(actor.cooldown_remaining(&id), 0);
            assert!(!actor.is_on_cooldown(&id));
            assert!(!actor.is_on_cooldown(&AbilityId::new("absent")));
        }

        #[test]
        fn cooldown_never_shortens() {
            let mut actor = dummy(10, 0);
            let id = AbilityId::new("x");
            actor.apply_cooldown(&id, 1);
            actor.apply_cooldown(&id, 3);
            actor.apply_cooldown(&id, 1);
            assert_eq!(actor.cooldown_remaining(&id), 3);
        }

        #[test]
        fn poison_ticks_at_turn_start() {
            let mut actor = dummy(10, 5);
            actor.apply_status(StatusEffect::new(StatusKind::Poison, 2, 2));
            actor.begin_turn();
            assert_eq!(actor.current_hp(), 8);
            actor.end_turn();
            actor.begin_turn();
            assert_eq!(actor.current_hp(), 6);
            actor.end_turn();
            assert!(actor.statuses().is_empty());
        }

        #[test]
        fn huge_stacks_kill_without_overflow() {
            let mut actor = dummy(10, 0);
            actor.apply_status(StatusEffect::new(StatusKind::Poison, 2, u32::MAX));
            actor.apply_status(StatusEffect::new(StatusKind::Bleed, 2, 1));
            actor.begin_turn();
            assert_eq!(actor.current_hp(), 0);
            assert!(!actor.is_alive());
        }
    }

    mod modifier_tests {
        use super::*;

        #[test]
        fn consume_resets_modifier() {
            let mut actor = dummy(10, 0);
            actor.add_next_attack_modifier(-1);
            actor.add_next_attack_modifier(3);
            assert_eq!(actor.consume_next_attack_modifier(), 2);
            assert_eq!(actor.consume_next_attack_modifier(), 0);
        }

        #[test]
        fn marks_consume_one_at_a_time() {
            let mut actor = dummy(10, 0);
            actor.add_mark();
            actor.add_mark();
            assert!(actor.consume_mark());
            assert_eq!(actor.mark_stacks(), 1);
            assert!(actor.consume_mark());
            assert!(!actor.consume_mark());
        }

        #[test]
        fn swap_active_item_checks_bounds() {
            let def = CharacterDefinition::new("w", "W", BaseStats::new(10, 1, 0, 1))
                .with_item(PermanentItem { id: "i0".into(), ..PermanentItem::default() })
                .with_item(PermanentItem { id: "i1".into(), ..PermanentItem::default() })
                .with_item(PermanentItem { id: "i2".into(), ..PermanentItem::default() });
            let mut actor = CombatActor::new(ActorId::new(0), Side::Player, &def, &BattleConfig::default());
            assert!(!actor.swap_active_item(0, 1));
            assert!(!actor.swap_active_item(5, 2));
            assert!(!actor.swap_active_item(0, 7));
            assert!(actor.swap_active_item(0, 2));
            let active: Vec<_> = actor.active_items().iter().map(|i| i.id.as_str()).collect();
            assert_eq!(active, vec!["i2", "i1"]);
        }
    }
}
