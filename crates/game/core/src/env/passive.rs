//! Passive definitions.
//!
//! A passive is an always-on modifier. The closed [`PassiveEffect`] set is
//! enumerated once here; each hook below answers "what does this passive
//! contribute at this point", so call sites never compare kinds ad hoc.

/// Always-active modifier attached to a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum PassiveEffect {
    /// Heal this much at the start of each turn.
    Regen(u32),
    /// Landed hits set the target's `burning` to this value.
    Burn(u32),
    /// Outgoing damage is increased by this percentage.
    DamageBoost(u32),
    /// Percent chance to fully dodge an incoming hit.
    DodgeChance(u32),
    /// Extra cooldown turns removed at each end-of-turn tick.
    CooldownReduction(u32),
    /// Flat reduction of every ability's mana cost.
    ManaReduction(u32),
}

impl PassiveEffect {
    /// Start-of-turn heal.
    pub const fn regen(&self) -> u32 {
        match self {
            Self::Regen(amount) => *amount,
            _ => 0,
        }
    }

    /// Burn applied to targets on landed hits.
    pub const fn burn_on_hit(&self) -> Option<u32> {
        match self {
            Self::Burn(amount) => Some(*amount),
            _ => None,
        }
    }

    pub const fn damage_boost_pct(&self) -> u32 {
        match self {
            Self::DamageBoost(pct) => *pct,
            _ => 0,
        }
    }

    pub const fn dodge_pct(&self) -> u32 {
        match self {
            Self::DodgeChance(pct) => *pct,
            _ => 0,
        }
    }

    pub const fn cooldown_reduction(&self) -> u32 {
        match self {
            Self::CooldownReduction(turns) => *turns,
            _ => 0,
        }
    }

    pub const fn mana_reduction(&self) -> u32 {
        match self {
            Self::ManaReduction(amount) => *amount,
            _ => 0,
        }
    }
}

/// Named passive as authored in content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveDefinition {
    pub name: String,
    pub effect: PassiveEffect,
}

impl PassiveDefinition {
    pub fn new(name: impl Into<String>, effect: PassiveEffect) -> Self {
        Self {
            name: name.into(),
            effect,
        }
    }
}
