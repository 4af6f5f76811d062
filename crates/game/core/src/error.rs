//! Error classification shared by every battle-core error type.
//!
//! Each operation owns its error enum (`ActionError` next to validation,
//! `ResolveError` next to the resolver, `SetupError` next to battle setup).
//! All of them implement [`BattleError`] so callers can decide how to react
//! without matching on every variant.

/// How a caller should react to an error.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorSeverity {
    /// The player can pick another action this turn (cooldown, mana, stun).
    Recoverable,

    /// The request itself is malformed (unknown slot, wrong roster size).
    Validation,

    /// A rule the engine enforces was broken internally; the turn is rolled back.
    Internal,

    /// The battle state can no longer be trusted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True for engine bugs rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Severity plus a stable code, implemented by every error enum in the crate.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and tests; defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Recoverable.is_internal());
        assert_eq!(ErrorSeverity::Validation.to_string(), "validation");
    }
}
