//! Turn orchestration.
//!
//! The [`BattleEngine`] is the only writer of [`BattleState`]. One call to
//! [`BattleEngine::submit_player_action`] runs a complete turn: the player's
//! action, the automated opponent response and the shared end-of-turn
//! bookkeeping. Turns resolve atomically; there is no suspension point.
//! [`BattleEngine::pass_turn`] runs the same turn without a player action
//! when no player combatant is able to act.

mod errors;
mod phase;
mod turn;
mod validation;

pub use errors::{ActionError, TurnError};
pub use phase::TurnPhase;

use crate::config::BattleConfig;
use crate::env::BattleRng;
use crate::policy::{OpponentPolicy, PlannedAction};
use crate::state::{AbilityChoice, BattleEvent, BattleState, Outcome, Side};

/// Collaborators consumed while resolving a turn.
pub struct BattleEnv<'a> {
    pub config: &'a BattleConfig,
    /// Source of every random roll: opponent choice, dodge, status procs.
    pub rng: &'a mut dyn BattleRng,
    /// Decides the opponent side's action.
    pub policy: &'a dyn OpponentPolicy,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        config: &'a BattleConfig,
        rng: &'a mut dyn BattleRng,
        policy: &'a dyn OpponentPolicy,
    ) -> Self {
        Self {
            config,
            rng,
            policy,
        }
    }
}

/// Action requested by the player for one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerAction {
    /// Slot of the acting combatant in the player roster.
    pub actor: usize,
    pub ability: AbilityChoice,
    /// Slot in the opposing roster, or in the player roster for ally-targeting
    /// abilities. Ignored by abilities that pick their own targets.
    pub target: Option<usize>,
}

impl PlayerAction {
    pub fn new(actor: usize, ability: AbilityChoice) -> Self {
        Self {
            actor,
            ability,
            target: None,
        }
    }

    pub fn targeting(mut self, target: usize) -> Self {
        self.target = Some(target);
        self
    }
}

impl From<PlannedAction> for PlayerAction {
    fn from(plan: PlannedAction) -> Self {
        Self {
            actor: plan.actor,
            ability: plan.ability,
            target: plan.target,
        }
    }
}

/// Everything one completed turn produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    /// Turn number the events were logged under.
    pub turn: u32,
    pub events: Vec<BattleEvent>,
    pub outcome: Outcome,
}

impl TurnReport {
    /// Human-readable log lines for this turn.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

/// Battle engine driving a [`BattleState`] through its turn state machine.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Checks a player action without touching the state.
    pub fn validate(&self, action: &PlayerAction) -> Result<(), ActionError> {
        validation::validate_action(
            self.state,
            Side::Player,
            action.actor,
            action.ability,
            action.target,
        )
    }

    fn enter(&mut self, phase: TurnPhase) {
        tracing::trace!(from = %self.state.phase, to = %phase, "turn phase");
        self.state.phase = phase;
    }
}

/// Runs one turn on `state`. See [`BattleEngine::submit_player_action`].
pub fn submit_player_action(
    state: &mut BattleState,
    env: &mut BattleEnv<'_>,
    action: PlayerAction,
) -> Result<TurnReport, TurnError> {
    BattleEngine::new(state).submit_player_action(env, action)
}

/// Runs one turn on `state` without a player action. See
/// [`BattleEngine::pass_turn`].
pub fn pass_turn(
    state: &mut BattleState,
    env: &mut BattleEnv<'_>,
) -> Result<TurnReport, TurnError> {
    BattleEngine::new(state).pass_turn(env)
}
