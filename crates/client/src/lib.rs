//! Headless battle runner.
//!
//! The client is the composition root for a simulated battle: it loads
//! content through `battle-content`, builds a seeded RNG, and drives both
//! sides of a `battle-core` battle with opponent policies until the battle
//! ends or the turn limit is reached.
pub mod autoplay;
pub mod config;
pub mod logging;

pub use autoplay::{Autoplay, SimReport, StopReason};
pub use config::{PolicyKind, SimConfig};
