//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe both teams, turn
//! bookkeeping and the battle log. Callers read this state freely but mutate
//! it exclusively through [`crate::engine::BattleEngine`].
mod combatant;
mod error;
mod log;
mod status;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::engine::TurnPhase;
use crate::env::{CharacterDefinition, Progression};

pub use combatant::{
    AbilityChoice, AbilitySlot, Combatant, CombatantRecord, DamageApplied, StartOfTurnTick,
};
pub use error::{CombatantError, SetupError};
pub use log::{BattleEvent, BattleLog, LogEntry, Participant};
pub use status::StatusSet;

/// One team of combatants, in roster order.
pub type Team = ArrayVec<Combatant, { BattleConfig::ROSTER_SIZE }>;

/// Which team a combatant belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const fn opposite(&self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Battle outcome as seen by the player.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Outcome {
    InProgress,
    Win,
    Lose,
}

impl Outcome {
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Pending UI selection (actor, ability, target) for the next submission.
///
/// The orchestrator clears it once a turn completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub actor: Option<usize>,
    pub ability: Option<AbilityChoice>,
    pub target: Option<usize>,
}

/// Canonical snapshot of one battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub(crate) players: Team,
    pub(crate) opponents: Team,
    /// Starts at 1; increments after each completed turn.
    pub(crate) turn: u32,
    pub(crate) phase: TurnPhase,
    pub(crate) log: BattleLog,
    pub(crate) selection: Selection,
}

impl BattleState {
    /// Builds a battle from two rosters at base progression.
    pub fn new(
        players: &[CharacterDefinition],
        opponents: &[CharacterDefinition],
        config: &BattleConfig,
    ) -> Result<Self, SetupError> {
        let players: Vec<_> = players.iter().map(|def| (def, Progression::BASE)).collect();
        let opponents: Vec<_> = opponents.iter().map(|def| (def, Progression::BASE)).collect();
        Self::with_progression(&players, &opponents, config)
    }

    /// Builds a battle where each roster entry carries its own progression.
    pub fn with_progression(
        players: &[(&CharacterDefinition, Progression)],
        opponents: &[(&CharacterDefinition, Progression)],
        config: &BattleConfig,
    ) -> Result<Self, SetupError> {
        let players = build_team(Side::Player, players, config)?;
        let opponents = build_team(Side::Opponent, opponents, config)?;

        tracing::info!(
            players = ?players.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            opponents = ?opponents.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "battle started"
        );

        Ok(Self {
            players,
            opponents,
            turn: 1,
            phase: TurnPhase::AwaitingPlayerAction,
            log: BattleLog::new(),
            selection: Selection::default(),
        })
    }

    // ===== read-only accessors =====

    pub fn players(&self) -> &[Combatant] {
        &self.players
    }

    pub fn opponents(&self) -> &[Combatant] {
        &self.opponents
    }

    pub fn team(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Player => &self.players,
            Side::Opponent => &self.opponents,
        }
    }

    pub fn combatant(&self, side: Side, slot: usize) -> Option<&Combatant> {
        self.team(side).get(slot)
    }

    /// Mutable access for scenario setup and save restoration.
    ///
    /// Combatant mutators keep their own invariants; turn sequencing remains
    /// the engine's job.
    pub fn combatant_mut(&mut self, side: Side, slot: usize) -> Option<&mut Combatant> {
        self.team_mut(side).get_mut(slot)
    }

    pub(crate) fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Player => &mut self.players,
            Side::Opponent => &mut self.opponents,
        }
    }

    /// Disjoint mutable borrows of (acting team, opposing team).
    pub(crate) fn teams_mut(&mut self, acting: Side) -> (&mut Team, &mut Team) {
        match acting {
            Side::Player => (&mut self.players, &mut self.opponents),
            Side::Opponent => (&mut self.opponents, &mut self.players),
        }
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.phase.outcome()
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Records the UI's pending selection. Has no effect on resolution.
    pub fn select(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// True when every combatant of `side` is at 0 HP.
    pub fn is_wiped(&self, side: Side) -> bool {
        self.team(side).iter().all(Combatant::is_defeated)
    }

    /// Final read-out for the reward/persistence layer.
    pub fn summary(&self) -> BattleSummary {
        let survivors = |team: &[Combatant]| -> Vec<String> {
            team.iter()
                .filter(|c| c.is_alive())
                .map(|c| c.character_id.clone())
                .collect()
        };
        BattleSummary {
            outcome: self.outcome(),
            turns: self.turn,
            player_survivors: survivors(self.players.as_slice()),
            opponent_survivors: survivors(self.opponents.as_slice()),
            log_entries: self.log.len(),
        }
    }

    /// Captures everything a turn may change. The log is recorded by length
    /// only, since turns never rewrite earlier entries.
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            players: self.players.clone(),
            opponents: self.opponents.clone(),
            turn: self.turn,
            phase: self.phase,
            selection: self.selection,
            log_len: self.log.len(),
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.players = checkpoint.players;
        self.opponents = checkpoint.opponents;
        self.turn = checkpoint.turn;
        self.phase = checkpoint.phase;
        self.selection = checkpoint.selection;
        self.log.truncate(checkpoint.log_len);
    }
}

/// Restore point taken before a turn resolves.
#[derive(Debug)]
pub(crate) struct Checkpoint {
    players: Team,
    opponents: Team,
    turn: u32,
    phase: TurnPhase,
    selection: Selection,
    log_len: usize,
}

/// What the excluded reward layer reads once a battle ends.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSummary {
    pub outcome: Outcome,
    pub turns: u32,
    pub player_survivors: Vec<String>,
    pub opponent_survivors: Vec<String>,
    pub log_entries: usize,
}

/// Starts a battle from two rosters of `BattleConfig::ROSTER_SIZE` characters.
pub fn start_battle(
    players: &[CharacterDefinition],
    opponents: &[CharacterDefinition],
    config: &BattleConfig,
) -> Result<BattleState, SetupError> {
    BattleState::new(players, opponents, config)
}

fn build_team(
    side: Side,
    roster: &[(&CharacterDefinition, Progression)],
    config: &BattleConfig,
) -> Result<Team, SetupError> {
    if roster.len() != BattleConfig::ROSTER_SIZE {
        return Err(SetupError::RosterSize {
            side,
            expected: BattleConfig::ROSTER_SIZE,
            actual: roster.len(),
        });
    }

    let mut team = Team::new();
    for (definition, progression) in roster {
        team.push(Combatant::from_definition(definition, *progression, config)?);
    }
    Ok(team)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AbilityDefinition, AbilityKind, BaseStats};

    fn character(id: &str) -> CharacterDefinition {
        CharacterDefinition::new(
            id,
            id.to_uppercase(),
            BaseStats::new(100, 30),
            vec![AbilityDefinition::new("hit", "Hit", AbilityKind::Attack).with_damage(10)],
            AbilityDefinition::new("ult", "Ult", AbilityKind::UltimateSweep).with_damage(40),
        )
    }

    #[test]
    fn starts_at_turn_one_awaiting_input() {
        let roster = [character("a"), character("b"), character("c")];
        let state = start_battle(&roster, &roster, &BattleConfig::default()).unwrap();
        assert_eq!(state.turn(), 1);
        assert_eq!(state.phase(), TurnPhase::AwaitingPlayerAction);
        assert_eq!(state.outcome(), Outcome::InProgress);
        assert!(state.log().is_empty());
        assert_eq!(state.players().len(), 3);
        assert!(state.opponents().iter().all(|c| c.hp() == 100 && c.mana() == 30));
    }

    #[test]
    fn rejects_wrong_roster_size() {
        let roster = [character("a"), character("b")];
        let full = [character("a"), character("b"), character("c")];
        let err = start_battle(&roster, &full, &BattleConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SetupError::RosterSize {
                side: Side::Player,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn summary_lists_survivors() {
        let roster = [character("a"), character("b"), character("c")];
        let mut state = start_battle(&roster, &roster, &BattleConfig::default()).unwrap();
        state.combatant_mut(Side::Opponent, 1).unwrap().set_hp(0);

        let summary = state.summary();
        assert_eq!(summary.outcome, Outcome::InProgress);
        assert_eq!(summary.player_survivors.len(), 3);
        assert_eq!(summary.opponent_survivors, vec!["a".to_string(), "c".to_string()]);
        assert!(!state.is_wiped(Side::Opponent));
    }

    #[test]
    fn restore_rewinds_teams_and_drops_newer_log_entries() {
        let roster = [character("a"), character("b"), character("c")];
        let mut state = start_battle(&roster, &roster, &BattleConfig::default()).unwrap();
        state.log.push(1, BattleEvent::NoAction { side: Side::Opponent });
        let before = state.clone();
        let checkpoint = state.checkpoint();

        state.combatant_mut(Side::Player, 0).unwrap().set_hp(0);
        state.turn = 7;
        state.phase = TurnPhase::Lost;
        state.log.push(7, BattleEvent::Defeat);
        state.restore(checkpoint);

        assert_eq!(state, before);
        assert_eq!(state.log().len(), 1);
    }
}
