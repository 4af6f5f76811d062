//! Read-only battle inputs.
//!
//! Character, ability and passive definitions are static content supplied by
//! an external content layer; the random source is injected by the caller.
//! Nothing in this module is mutated during a battle.
mod ability;
mod character;
mod passive;
mod rng;

pub use ability::{AbilityDefinition, AbilityKind, StatusKind, StatusPayload, TargetRequirement};
pub use character::{BaseStats, CharacterDefinition, Progression, Rarity};
pub use passive::{PassiveDefinition, PassiveEffect};
pub use rng::{BattleRng, PcgRng, RandRng, SequenceRng};
