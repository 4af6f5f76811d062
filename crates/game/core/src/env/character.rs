//! Character definitions and progression scaling.

use crate::config::BattleConfig;

use super::ability::AbilityDefinition;
use super::passive::PassiveDefinition;

/// Gacha rarity tier, copied onto the combatant for display.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Base stat block.
///
/// Only `max_hp` and `max_mana` drive live battles; the remaining stats are
/// carried for the character sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub max_hp: u32,
    pub max_mana: u32,
    pub attack: u32,
    pub defense: u32,
    pub cursed_output: u32,
    pub cursed_resistance: u32,
}

impl BaseStats {
    pub const fn new(max_hp: u32, max_mana: u32) -> Self {
        Self {
            max_hp,
            max_mana,
            attack: 0,
            defense: 0,
            cursed_output: 0,
            cursed_resistance: 0,
        }
    }
}

/// Immutable character definition supplied by the content layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    pub stats: BaseStats,
    pub abilities: Vec<AbilityDefinition>,
    pub ultimate: AbilityDefinition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<PassiveDefinition>,
    /// Critical hit chance in percent, shown on the character sheet.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: u8,
}

impl CharacterDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        stats: BaseStats,
        abilities: Vec<AbilityDefinition>,
        ultimate: AbilityDefinition,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rarity: Rarity::default(),
            stats,
            abilities,
            ultimate,
            passive: None,
            crit_chance: 0,
        }
    }

    pub fn with_passive(mut self, passive: PassiveDefinition) -> Self {
        self.passive = Some(passive);
        self
    }
}

/// Player-side progression of a character instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    pub level: u32,
    pub limit_break: u32,
}

impl Progression {
    /// Level 1, no limit break: scaling factor of exactly 100%.
    pub const BASE: Self = Self {
        level: 1,
        limit_break: 0,
    };

    pub const fn new(level: u32, limit_break: u32) -> Self {
        Self { level, limit_break }
    }

    /// Scaling factor in percent.
    pub fn factor_pct(&self, config: &BattleConfig) -> u32 {
        let levels = self.level.saturating_sub(1);
        100u32
            .saturating_add(levels.saturating_mul(config.level_step_pct))
            .saturating_add(self.limit_break.saturating_mul(config.limit_break_step_pct))
    }

    /// Applies the scaling factor to a stat, flooring the result.
    pub fn scale(&self, value: u32, config: &BattleConfig) -> u32 {
        let scaled = u64::from(value) * u64::from(self.factor_pct(config)) / 100;
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::BASE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_progression_is_identity() {
        let config = BattleConfig::default();
        assert_eq!(Progression::BASE.factor_pct(&config), 100);
        assert_eq!(Progression::BASE.scale(37, &config), 37);
    }

    #[test]
    fn level_and_limit_break_stack_additively() {
        let config = BattleConfig::default();
        // level 11 -> +50%, limit break 2 -> +20%
        let progression = Progression::new(11, 2);
        assert_eq!(progression.factor_pct(&config), 170);
        assert_eq!(progression.scale(100, &config), 170);
        assert_eq!(progression.scale(15, &config), 25);
    }

    #[test]
    fn level_zero_is_treated_as_level_one() {
        let config = BattleConfig::default();
        assert_eq!(Progression::new(0, 0).factor_pct(&config), 100);
    }
}
