use crate::state::Outcome;

/// Turn orchestrator states.
///
/// ```text
/// awaiting-player-action -> validating -> resolving-player-action
///     -> resolving-opponent-action -> ticking-end-of-turn -> checking-outcome
///     -> (awaiting-player-action | won | lost)
/// ```
///
/// A winning player action jumps from `resolving-player-action` straight to
/// `won`. Between calls the state only ever rests in
/// `awaiting-player-action`, `won` or `lost`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum TurnPhase {
    #[default]
    AwaitingPlayerAction,
    Validating,
    ResolvingPlayerAction,
    ResolvingOpponentAction,
    TickingEndOfTurn,
    CheckingOutcome,
    Won,
    Lost,
}

impl TurnPhase {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(&self) -> Outcome {
        match self {
            Self::Won => Outcome::Win,
            Self::Lost => Outcome::Lose,
            _ => Outcome::InProgress,
        }
    }
}
