//! Timed status effects carried by an actor.
//!
//! Statuses of the same kind merge: stacks add up and the longer duration
//! wins. Damage-over-time kinds tick at the start of the bearer's turn and
//! every status decays at the end of it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of status effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Damage over time.
    Poison,
    /// Loses the action phase.
    Stun,
    /// Damage over time.
    Bleed,
    /// Damage over time.
    Burn,
    /// Loses the action phase.
    Freeze,
}

impl StatusKind {
    /// Returns true for kinds that deal damage each turn.
    #[must_use]
    pub const fn deals_damage(self) -> bool {
        matches!(self, Self::Poison | Self::Bleed | Self::Burn)
    }

    /// Returns true for kinds that cost the bearer its action.
    #[must_use]
    pub const fn incapacitates(self) -> bool {
        matches!(self, Self::Stun | Self::Freeze)
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Poison => "Poison",
            Self::Stun => "Stun",
            Self::Bleed => "Bleed",
            Self::Burn => "Burn",
            Self::Freeze => "Freeze",
        };
        f.write_str(name)
    }
}

/// A single status instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// What the status does.
    pub kind: StatusKind,
    /// Turns left, counted by the bearer's `end_turn`.
    pub duration: u32,
    /// Intensity; damage-over-time deals this much per tick.
    pub stacks: u32,
}

impl StatusEffect {
    /// Creates a status instance.
    #[must_use]
    pub const fn new(kind: StatusKind, duration: u32, stacks: u32) -> Self {
        Self {
            kind,
            duration,
            stacks,
        }
    }
}

/// The set of statuses on one actor, at most one entry per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusContainer {
    statuses: Vec<StatusEffect>,
}

impl StatusContainer {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a status, merging with an existing one of the same kind.
    ///
    /// Zero-duration or zero-stack effects are dropped.
    pub fn add(&mut self, effect: StatusEffect) {
        if effect.duration == 0 || effect.stacks == 0 {
            return;
        }
        if let Some(existing) = self.statuses.iter_mut().find(|s| s.kind == effect.kind) {
            existing.stacks = existing.stacks.saturating_add(effect.stacks);
            existing.duration = existing.duration.max(effect.duration);
        } else {
            self.statuses.push(effect);
        }
    }

    /// Returns the status of the given kind, if present.
    #[must_use]
    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.statuses.iter().find(|s| s.kind == kind)
    }

    /// Returns true if a status of the given kind is present.
    #[must_use]
    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    /// Returns true if any present status costs the bearer its action.
    #[must_use]
    pub fn is_incapacitating(&self) -> bool {
        self.statuses.iter().any(|s| s.kind.incapacitates())
    }

    /// Total damage the damage-over-time statuses deal this tick.
    #[must_use]
    pub fn periodic_damage(&self) -> u32 {
        self.statuses
            .iter()
            .filter(|s| s.kind.deals_damage())
            .map(|s| s.stacks)
            .fold(0, u32::saturating_add)
    }

    /// Decrements every duration and drops expired statuses.
    pub fn decay(&mut self) {
        for status in &mut self.statuses {
            status.duration = status.duration.saturating_sub(1);
        }
        self.statuses.retain(|s| s.duration > 0);
    }

    /// Iterates over present statuses in application order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.statuses.iter()
    }

    /// Returns the number of distinct statuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Returns true if no status is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
