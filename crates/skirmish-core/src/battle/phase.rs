//! Controller states and outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Encounter flavor, reported in [`BattleEvent::BattleStarted`].
///
/// [`BattleEvent::BattleStarted`]: super::BattleEvent::BattleStarted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleType {
    /// A regular fight.
    #[default]
    Normal,
    /// A mid-stage boss.
    MiniBoss,
    /// The last fight of a run.
    FinalBoss,
}

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// Every enemy died.
    PlayerWon,
    /// Every player actor died.
    PlayerLost,
    /// The turn order emptied or the iteration ceiling was hit.
    Draw,
}

impl BattleOutcome {
    /// Returns true only for [`BattleOutcome::PlayerWon`].
    #[must_use]
    pub const fn player_won(self) -> bool {
        matches!(self, Self::PlayerWon)
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerWon => write!(f, "player won"),
            Self::PlayerLost => write!(f, "player lost"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// Which player selection the controller is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputStage {
    /// Waiting for `try_choose_ability`.
    Ability,
    /// An ability was picked; waiting for `try_choose_target`.
    Target,
}

/// Sub-state of a running encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunningState {
    /// The loop is advancing on its own.
    RunningAi,
    /// Suspended on player input.
    AwaitingInput(InputStage),
}

/// Controller state.
///
/// ```text
/// NotStarted -> Running(RunningAi <-> AwaitingInput) -> Finished(outcome)
///                  \-> Aborted (from any running state)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePhase {
    /// `begin_battle` has not succeeded yet.
    #[default]
    NotStarted,
    /// The round loop is live.
    Running(RunningState),
    /// Terminal: the encounter reached an outcome.
    Finished(BattleOutcome),
    /// Terminal: torn down from outside.
    Aborted,
}

impl BattlePhase {
    /// Returns true while awaiting any player selection.
    #[must_use]
    pub const fn is_awaiting_input(self) -> bool {
        matches!(self, Self::Running(RunningState::AwaitingInput(_)))
    }

    /// Returns true once finished or aborted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished(_) | Self::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_win_reports_player_won() {
        assert!(BattleOutcome::PlayerWon.player_won());
        assert!(!BattleOutcome::PlayerLost.player_won());
        assert!(!BattleOutcome::Draw.player_won());
    }

    #[test]
    fn phase_predicates() {
        assert!(!BattlePhase::NotStarted.is_terminal());
        assert!(BattlePhase::Aborted.is_terminal());
        assert!(BattlePhase::Finished(BattleOutcome::Draw).is_terminal());
        assert!(BattlePhase::Running(RunningState::AwaitingInput(InputStage::Target)).is_awaiting_input());
        assert!(!BattlePhase::Running(RunningState::RunningAi).is_awaiting_input());
    }
}
