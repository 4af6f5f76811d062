/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Mana restored to every living combatant during the end-of-turn tick.
    pub mana_regen_per_turn: u32,
    /// Percentage added to scaled stats per character level above 1.
    pub level_step_pct: u32,
    /// Percentage added to scaled stats per limit break.
    pub limit_break_step_pct: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of combatants on each side.
    pub const ROSTER_SIZE: usize = 3;
    /// Maximum regular abilities per character (the ultimate is tracked separately).
    pub const MAX_ABILITIES: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MANA_REGEN_PER_TURN: u32 = 5;
    pub const DEFAULT_LEVEL_STEP_PCT: u32 = 5;
    pub const DEFAULT_LIMIT_BREAK_STEP_PCT: u32 = 10;

    pub fn new() -> Self {
        Self {
            mana_regen_per_turn: Self::DEFAULT_MANA_REGEN_PER_TURN,
            level_step_pct: Self::DEFAULT_LEVEL_STEP_PCT,
            limit_break_step_pct: Self::DEFAULT_LIMIT_BREAK_STEP_PCT,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
