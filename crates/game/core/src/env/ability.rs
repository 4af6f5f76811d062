//! Ability definitions.
//!
//! Abilities are static content: the runtime cooldown of each ability lives on
//! the combatant (`AbilitySlot`), never here.

/// Closed set of ability categories.
///
/// Each variant maps to exactly one resolution branch in
/// [`crate::combat::resolve_ability`]. New ultimate types are new variants.
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
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AbilityKind {
    /// Damage one enemy.
    Attack,
    /// Damage every living enemy.
    AttackAll,
    /// Damage one enemy and stun it.
    AttackStun,
    /// Stun one enemy without dealing damage.
    StunOnly,
    /// Caster becomes invincible until the end of the turn.
    Defensive,
    /// Flat attack bonus for the caster.
    Buff,
    /// Heal the caster.
    HealSelf,
    /// Heal every living ally.
    HealAll,
    /// Heal one living ally.
    HealAlly,

    // ========================================================================
    // Ultimates (compound effects)
    // ========================================================================
    /// Damage every living enemy.
    UltimateSweep,
    /// Damage every living enemy, then heal every living ally.
    UltimateSweepHeal,
    /// Damage one enemy, then the caster becomes invincible.
    UltimateStrikeGuard,
    /// Damage and stun every living enemy.
    UltimateSweepStun,
}

/// Which combatants an ability needs to be pointed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum TargetRequirement {
    SingleEnemy,
    AllEnemies,
    Caster,
    Ally,
    AllAllies,
}

impl TargetRequirement {
    /// Returns true if the caller must supply a target index.
    pub const fn needs_target(&self) -> bool {
        matches!(self, Self::SingleEnemy | Self::Ally)
    }

    /// Returns true if the chosen target index refers to the caster's own team.
    pub const fn targets_allies(&self) -> bool {
        matches!(self, Self::Ally | Self::AllAllies | Self::Caster)
    }
}

impl AbilityKind {
    /// Target requirement derived from the category.
    pub const fn target_requirement(&self) -> TargetRequirement {
        use AbilityKind::*;
        match self {
            Attack | AttackStun | StunOnly | UltimateStrikeGuard => TargetRequirement::SingleEnemy,
            AttackAll | UltimateSweep | UltimateSweepHeal | UltimateSweepStun => {
                TargetRequirement::AllEnemies
            }
            Defensive | Buff | HealSelf => TargetRequirement::Caster,
            HealAlly => TargetRequirement::Ally,
            HealAll => TargetRequirement::AllAllies,
        }
    }
}

/// Timed condition an ability may inflict on the targets it lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum StatusKind {
    /// Sets `stunned = duration`.
    Stun,
    /// Sets `burning = magnitude`.
    Burn,
    /// Sets `marked = magnitude` for `duration` turns.
    Mark,
}

/// Status-effect payload carried by an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusPayload {
    pub kind: StatusKind,
    /// Proc chance in percent (0..=100).
    pub chance_pct: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magnitude: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: u32,
}

impl StatusPayload {
    pub const fn new(kind: StatusKind, chance_pct: u8, magnitude: u32, duration: u32) -> Self {
        Self {
            kind,
            chance_pct,
            magnitude,
            duration,
        }
    }
}

/// Immutable ability definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    pub kind: AbilityKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stun_duration: u32,
    /// Flat attack bonus granted by `buff`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub buff_amount: u32,
    /// Duration of `buff`, or of the invincibility granted by `ultimate-strike-guard`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<StatusPayload>,
}

impl AbilityDefinition {
    /// Creates an ability with every numeric field zeroed.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: AbilityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            damage: 0,
            heal: 0,
            mana_cost: 0,
            cooldown: 0,
            stun_duration: 0,
            buff_amount: 0,
            duration: 0,
            status: None,
        }
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_heal(mut self, heal: u32) -> Self {
        self.heal = heal;
        self
    }

    pub fn with_mana_cost(mut self, mana_cost: u32) -> Self {
        self.mana_cost = mana_cost;
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_stun(mut self, stun_duration: u32) -> Self {
        self.stun_duration = stun_duration;
        self
    }

    pub fn with_buff(mut self, buff_amount: u32, duration: u32) -> Self {
        self.buff_amount = buff_amount;
        self.duration = duration;
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_status(mut self, status: StatusPayload) -> Self {
        self.status = Some(status);
        self
    }

    #[inline]
    pub const fn target_requirement(&self) -> TargetRequirement {
        self.kind.target_requirement()
    }

    #[inline]
    pub const fn requires_target(&self) -> bool {
        self.kind.target_requirement().needs_target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_kebab_case() {
        assert_eq!("attack-all".parse::<AbilityKind>(), Ok(AbilityKind::AttackAll));
        assert_eq!("Heal-Self".parse::<AbilityKind>(), Ok(AbilityKind::HealSelf));
        assert_eq!(
            "ultimate-strike-guard".parse::<AbilityKind>(),
            Ok(AbilityKind::UltimateStrikeGuard)
        );
        assert_eq!(AbilityKind::StunOnly.to_string(), "stun-only");
    }

    #[test]
    fn target_requirements() {
        assert!(AbilityKind::Attack.target_requirement().needs_target());
        assert!(AbilityKind::HealAlly.target_requirement().needs_target());
        assert!(AbilityKind::HealAlly.target_requirement().targets_allies());
        assert!(!AbilityKind::AttackAll.target_requirement().needs_target());
        assert!(!AbilityKind::Defensive.target_requirement().needs_target());
    }
}
