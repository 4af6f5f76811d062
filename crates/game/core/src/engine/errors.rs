//! Error types for turn submission.

use crate::combat::ResolveError;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{AbilityChoice, Outcome};

/// Reasons a submitted action is rejected before anything is resolved.
///
/// Rejection appends a warning to the battle log and leaves the rest of the
/// state untouched; the player may re-submit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("the battle is already over ({outcome})")]
    BattleOver { outcome: Outcome },

    #[error("no combatant in slot {slot}")]
    UnknownActor { slot: usize },

    #[error("{name} has been defeated and cannot act")]
    ActorDefeated { name: String },

    #[error("{name} is stunned for {turns} more turn(s)")]
    ActorStunned { name: String, turns: u32 },

    #[error("{name} has no {ability}")]
    UnknownAbility { name: String, ability: AbilityChoice },

    #[error("{ability} is on cooldown ({turns} turn(s) left)")]
    OnCooldown { ability: String, turns: u32 },

    #[error("not enough mana for {ability} (required: {required}, available: {available})")]
    InsufficientMana {
        ability: String,
        required: u32,
        available: u32,
    },

    #[error("{ability} requires a target")]
    MissingTarget { ability: String },

    #[error("no target in slot {slot}")]
    UnknownTarget { slot: usize },

    #[error("{name} has already been defeated")]
    TargetDefeated { name: String },

    #[error("cannot pass while {name} has a usable ability")]
    CanStillAct { name: String },
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::BattleOver { .. } | Self::UnknownActor { .. } | Self::UnknownAbility { .. } => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleOver { .. } => "ACTION_BATTLE_OVER",
            Self::UnknownActor { .. } => "ACTION_UNKNOWN_ACTOR",
            Self::ActorDefeated { .. } => "ACTION_ACTOR_DEFEATED",
            Self::ActorStunned { .. } => "ACTION_ACTOR_STUNNED",
            Self::UnknownAbility { .. } => "ACTION_UNKNOWN_ABILITY",
            Self::OnCooldown { .. } => "ACTION_ON_COOLDOWN",
            Self::InsufficientMana { .. } => "ACTION_INSUFFICIENT_MANA",
            Self::MissingTarget { .. } => "ACTION_MISSING_TARGET",
            Self::UnknownTarget { .. } => "ACTION_UNKNOWN_TARGET",
            Self::TargetDefeated { .. } => "ACTION_TARGET_DEFEATED",
            Self::CanStillAct { .. } => "ACTION_CAN_STILL_ACT",
        }
    }
}

/// Errors surfaced by [`super::BattleEngine::submit_player_action`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// The action was rejected; a warning was logged.
    #[error("invalid action: {0}")]
    Invalid(#[from] ActionError),

    /// Resolution hit an inconsistent state; the turn was rolled back.
    #[error("turn resolution failed: {0}")]
    Internal(#[from] ResolveError),
}

impl BattleError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invalid(error) => error.severity(),
            Self::Internal(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(error) => error.error_code(),
            Self::Internal(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_error_delegates_classification() {
        let invalid = TurnError::from(ActionError::OnCooldown {
            ability: "Strike".into(),
            turns: 2,
        });
        assert_eq!(invalid.severity(), ErrorSeverity::Recoverable);
        assert_eq!(invalid.error_code(), "ACTION_ON_COOLDOWN");
        assert_eq!(
            invalid.to_string(),
            "invalid action: Strike is on cooldown (2 turn(s) left)"
        );

        let internal = TurnError::from(ResolveError::MissingTarget {
            ability: "strike".into(),
        });
        assert!(internal.severity().is_internal());
    }
}
