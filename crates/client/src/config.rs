//! Simulation configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

use battle_core::{FocusWeakestPolicy, OpponentPolicy, RandomPolicy};

/// Which policy drives a side of the simulated battle.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PolicyKind {
    #[default]
    Random,
    Weakest,
}

impl PolicyKind {
    pub fn policy(self) -> &'static dyn OpponentPolicy {
        match self {
            Self::Random => &RandomPolicy,
            Self::Weakest => &FocusWeakestPolicy,
        }
    }
}

/// Configuration for one `battle-sim` run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Content directory; `None` uses the data bundled with `battle-content`.
    pub content_dir: Option<PathBuf>,
    pub seed: u64,
    /// Comma-separated roster entries (`id[:level[:limit_break]]`).
    pub player_roster: String,
    pub opponent_roster: String,
    /// Safety stop for battles that never reach a terminal outcome.
    pub max_turns: u32,
    pub player_policy: PolicyKind,
    pub opponent_policy: PolicyKind,
    pub log_dir: Option<PathBuf>,
}

impl SimConfig {
    pub const DEFAULT_SEED: u64 = 42;
    pub const DEFAULT_MAX_TURNS: u32 = 200;
    pub const DEFAULT_PLAYER_ROSTER: &'static str = "aria,bram,cleo";
    pub const DEFAULT_OPPONENT_ROSTER: &'static str = "dax,esme,fenn";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONTENT_DIR` - Directory holding `characters.ron` and `battle.toml`
    /// - `BATTLE_SEED` - RNG seed (default: 42)
    /// - `BATTLE_PLAYER_ROSTER` / `BATTLE_OPPONENT_ROSTER` - Roster entries
    /// - `BATTLE_MAX_TURNS` - Turn limit (default: 200)
    /// - `BATTLE_POLICY` - Opponent policy, `random` or `weakest` (default: random)
    /// - `BATTLE_PLAYER_POLICY` - Policy for the player side (default: weakest)
    /// - `BATTLE_LOG_DIR` - Also write logs to `battle-sim.log` in this directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.content_dir = env::var("BATTLE_CONTENT_DIR").ok().map(PathBuf::from);

        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = seed;
        }
        if let Ok(roster) = env::var("BATTLE_PLAYER_ROSTER") {
            config.player_roster = roster;
        }
        if let Ok(roster) = env::var("BATTLE_OPPONENT_ROSTER") {
            config.opponent_roster = roster;
        }
        if let Some(turns) = read_env::<u32>("BATTLE_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }
        if let Some(policy) = read_env::<PolicyKind>("BATTLE_POLICY") {
            config.opponent_policy = policy;
        }
        if let Some(policy) = read_env::<PolicyKind>("BATTLE_PLAYER_POLICY") {
            config.player_policy = policy;
        }

        config.log_dir = env::var("BATTLE_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            seed: Self::DEFAULT_SEED,
            player_roster: Self::DEFAULT_PLAYER_ROSTER.to_string(),
            opponent_roster: Self::DEFAULT_OPPONENT_ROSTER.to_string(),
            max_turns: Self::DEFAULT_MAX_TURNS,
            player_policy: PolicyKind::Weakest,
            opponent_policy: PolicyKind::Random,
            log_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_names_parse_case_insensitively() {
        assert_eq!("weakest".parse::<PolicyKind>().unwrap(), PolicyKind::Weakest);
        assert_eq!("RANDOM".parse::<PolicyKind>().unwrap(), PolicyKind::Random);
        assert!("smart".parse::<PolicyKind>().is_err());
        assert_eq!(PolicyKind::Weakest.to_string(), "weakest");
    }
}
