//! Data-driven battle content and loaders.
//!
//! This crate is the content layer the battle core reads from:
//! - Character catalogs (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//! - Roster resolution by character id, with optional progression
//!
//! Content is read once before a battle starts and never appears in battle
//! state except as deep copies inside each combatant.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CharacterCatalog, RosterEntry};

#[cfg(feature = "loaders")]
pub use loaders::{CharacterLoader, ConfigLoader, ContentFactory, LoadResult};
