//! Error types for encounter setup and definition validation.
//!
//! Only configuration problems are errors. Stray or late input during a
//! battle is ignored, and structural fallbacks (empty turn order, iteration
//! ceiling) resolve as a draw instead of failing.

use thiserror::Error;

use crate::actor::Side;

/// Errors reported by [`BattleController::begin_battle`].
///
/// [`BattleController::begin_battle`]: crate::battle::BattleController::begin_battle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    /// The player roster was empty.
    #[error("player team is empty")]
    EmptyPlayerTeam,
    /// The enemy roster was empty.
    #[error("enemy team is empty")]
    EmptyEnemyTeam,
    /// `begin_battle` was called on a controller that already ran.
    #[error("battle has already been started")]
    AlreadyStarted,
    /// Every actor on one side starts the encounter with zero HP.
    #[error("no living actors on the {0} side")]
    NoLivingActors(Side),
}

/// Errors reported when a character definition breaks its size limits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// More abilities than a definition may carry.
    #[error("character '{character}' defines {count} abilities (max {max})")]
    TooManyAbilities {
        /// Offending character id.
        character: String,
        /// Number of abilities supplied.
        count: usize,
        /// Allowed maximum.
        max: usize,
    },
    /// More passives than a definition may carry.
    #[error("character '{character}' defines {count} passives (max {max})")]
    TooManyPassives {
        /// Offending character id.
        character: String,
        /// Number of passives supplied.
        count: usize,
        /// Allowed maximum.
        max: usize,
    },
    /// More permanent items than a definition may carry.
    #[error("character '{character}' defines {count} permanent items (max {max})")]
    TooManyItems {
        /// Offending character id.
        character: String,
        /// Number of items supplied.
        count: usize,
        /// Allowed maximum.
        max: usize,
    },
    /// Max HP must be positive.
    #[error("character '{character}' has non-positive max HP {max_hp}")]
    NonPositiveMaxHp {
        /// Offending character id.
        character: String,
        /// The rejected value.
        max_hp: i32,
    },
    /// Abilities are keyed by id, so an empty id cannot hold a cooldown.
    #[error("character '{character}' has an ability with an empty id")]
    EmptyAbilityId {
        /// Offending character id.
        character: String,
    },
    /// Two abilities share an id and would share a cooldown slot.
    #[error("character '{character}' defines ability '{ability}' more than once")]
    DuplicateAbility {
        /// Offending character id.
        character: String,
        /// The repeated ability id.
        ability: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battle_error_messages_name_the_side() {
        let err = BattleError::NoLivingActors(Side::Enemy);
        assert_eq!(err.to_string(), "no living actors on the enemy side");
    }

    #[test]
    fn definition_error_messages_carry_limits() {
        let err = DefinitionError::TooManyAbilities {
            character: "warrior".to_string(),
            count: 8,
            max: 7,
        };
        assert_eq!(
            err.to_string(),
            "character 'warrior' defines 8 abilities (max 7)"
        );
    }
}
