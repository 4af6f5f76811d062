//! Deterministic turn-based battle rules shared by every client.
//!
//! `battle-core` owns the canonical battle rules: combatant state, ability
//! resolution, the turn orchestrator and the automated opponent policy. It is
//! a pure, synchronous library. All state mutation flows through
//! [`engine::BattleEngine`], randomness is injected through
//! [`env::BattleRng`], and character content is supplied by the caller as
//! [`env::CharacterDefinition`] records.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod policy;
pub mod state;

pub use combat::{
    HitCheck, HitGuard, ResolveError, RollingGuard, compute_damage, damage_taken, resolve_ability,
};
pub use config::BattleConfig;
pub use engine::{
    ActionError, BattleEngine, BattleEnv, PlayerAction, TurnError, TurnPhase, TurnReport,
    pass_turn, submit_player_action,
};
pub use env::{
    AbilityDefinition, AbilityKind, BaseStats, BattleRng, CharacterDefinition, PassiveDefinition,
    PassiveEffect, PcgRng, Progression, RandRng, Rarity, SequenceRng, StatusKind, StatusPayload,
    TargetRequirement,
};
pub use error::{BattleError, ErrorSeverity};
pub use policy::{BattleView, FocusWeakestPolicy, OpponentPolicy, PlannedAction, RandomPolicy};
pub use state::{
    AbilityChoice, AbilitySlot, BattleEvent, BattleLog, BattleState, BattleSummary, Combatant,
    CombatantError, CombatantRecord, DamageApplied, LogEntry, Outcome, Participant, Selection,
    SetupError, Side, StartOfTurnTick, StatusSet, start_battle,
};
