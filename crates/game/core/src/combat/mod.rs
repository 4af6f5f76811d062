//! Damage & effect resolution.
//!
//! This module computes and applies the effect of one ability given a caster,
//! the ability definition and its target(s). It holds no state of its own.
//!
//! # Architecture
//!
//! - **Damage**: `compute_damage` folds attack buffs and damage-boost passives
//! - **Hit checks**: the target's own defences (invincibility, dodge) are
//!   evaluated through a [`HitGuard`] supplied by the orchestrator
//! - **Resolution**: `resolve_ability` dispatches on [`crate::AbilityKind`]
//!   and returns the events it produced
//!
//! Randomness only enters through the guard (dodge rolls, status procs).

pub mod damage;
pub mod hit;
pub mod resolver;

pub use damage::{compute_damage, damage_taken};
pub use hit::{HitCheck, HitGuard, RollingGuard};
pub use resolver::{ResolveError, resolve_ability};
