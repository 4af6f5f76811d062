//! State management errors.
//!
//! Errors raised while building a battle from content, and by the combatant
//! mutators themselves.

use crate::error::{BattleError, ErrorSeverity};

use super::Side;

/// Errors raised by [`super::Combatant`] mutators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantError {
    #[error("insufficient mana (required: {required}, available: {available})")]
    InsufficientMana { required: u32, available: u32 },

    #[error("hp {hp} is outside 1..={max_hp}")]
    HpOutOfRange { hp: u32, max_hp: u32 },

    #[error("mana {mana} exceeds max mana {max_mana}")]
    ManaOutOfRange { mana: u32, max_mana: u32 },
}

impl BattleError for CombatantError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientMana { .. } => ErrorSeverity::Recoverable,
            Self::HpOutOfRange { .. } | Self::ManaOutOfRange { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientMana { .. } => "COMBATANT_INSUFFICIENT_MANA",
            Self::HpOutOfRange { .. } => "COMBATANT_HP_OUT_OF_RANGE",
            Self::ManaOutOfRange { .. } => "COMBATANT_MANA_OUT_OF_RANGE",
        }
    }
}

/// Errors that prevent a battle from starting.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("{side} roster must contain exactly {expected} characters (got {actual})")]
    RosterSize {
        side: Side,
        expected: usize,
        actual: usize,
    },

    #[error("character '{id}' has zero max hp")]
    ZeroHp { id: String },

    #[error("character '{id}' has no abilities")]
    NoAbilities { id: String },

    #[error("character '{id}' has {count} abilities (max: {max})")]
    TooManyAbilities { id: String, count: usize, max: usize },

    #[error("ability '{ability}' of character '{id}' has proc chance {chance_pct}% (max: 100)")]
    InvalidChance {
        id: String,
        ability: String,
        chance_pct: u8,
    },
}

impl BattleError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RosterSize { .. } => "SETUP_ROSTER_SIZE",
            Self::ZeroHp { .. } => "SETUP_ZERO_HP",
            Self::NoAbilities { .. } => "SETUP_NO_ABILITIES",
            Self::TooManyAbilities { .. } => "SETUP_TOO_MANY_ABILITIES",
            Self::InvalidChance { .. } => "SETUP_INVALID_CHANCE",
        }
    }
}
