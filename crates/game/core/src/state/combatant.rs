//! Mutable runtime state of one character mid-battle.
//!
//! # Invariants
//!
//! - `0 <= hp <= max_hp` and `0 <= mana <= max_mana` at all times
//! - `hp == 0` means defeated: a defeated combatant never acts, never heals
//!   and never loses further HP
//! - cooldown and status counters are unsigned and saturate at zero
//!
//! Vitals are private; every mutation goes through a clamping method.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::env::{
    AbilityDefinition, CharacterDefinition, PassiveDefinition, PassiveEffect, Progression, Rarity,
};

use super::error::{CombatantError, SetupError};
use super::status::StatusSet;

/// Reference to one of a combatant's abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityChoice {
    /// Index into the regular ability list.
    Slot(usize),
    Ultimate,
}

impl core::fmt::Display for AbilityChoice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Slot(index) => write!(f, "ability #{index}"),
            Self::Ultimate => f.write_str("ultimate"),
        }
    }
}

/// An ability together with its runtime cooldown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySlot {
    pub definition: AbilityDefinition,
    /// Turns until usable; 0 means ready.
    pub current_cooldown: u32,
}

impl AbilitySlot {
    fn scaled(definition: &AbilityDefinition, progression: Progression, config: &BattleConfig) -> Self {
        let mut definition = definition.clone();
        definition.damage = progression.scale(definition.damage, config);
        definition.heal = progression.scale(definition.heal, config);
        Self {
            definition,
            current_cooldown: 0,
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }
}

/// Result of [`Combatant::apply_damage`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageApplied {
    /// HP actually removed.
    pub lost: u32,
    /// True if this application brought HP to zero.
    pub defeated: bool,
    /// True if invincibility negated the damage.
    pub blocked: bool,
}

/// Result of [`Combatant::tick_statuses_start_of_turn`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StartOfTurnTick {
    /// HP restored by a regen passive.
    pub regen: u32,
    /// Burn damage, if the combatant was burning.
    pub burn: Option<DamageApplied>,
}

/// Runtime battle state for one character instance.
///
/// Deserialization goes through [`CombatantRecord`], so a loaded combatant
/// is held to the same vitals bounds as one built in battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "CombatantRecord", try_from = "CombatantRecord")
)]
pub struct Combatant {
    pub character_id: String,
    pub name: String,
    pub rarity: Rarity,

    hp: u32,
    max_hp: u32,
    mana: u32,
    max_mana: u32,

    abilities: ArrayVec<AbilitySlot, { BattleConfig::MAX_ABILITIES }>,
    ultimate: AbilitySlot,
    passive: Option<PassiveDefinition>,

    pub status: StatusSet,
}

impl Combatant {
    /// Deep-copies a definition into a fresh combatant: full HP and mana,
    /// zero cooldowns, zero statuses.
    pub fn from_definition(
        definition: &CharacterDefinition,
        progression: Progression,
        config: &BattleConfig,
    ) -> Result<Self, SetupError> {
        validate_definition(definition)?;

        let abilities = definition
            .abilities
            .iter()
            .map(|ability| AbilitySlot::scaled(ability, progression, config))
            .collect();
        let max_hp = progression.scale(definition.stats.max_hp, config);
        let max_mana = definition.stats.max_mana;

        Ok(Self {
            character_id: definition.id.clone(),
            name: definition.name.clone(),
            rarity: definition.rarity,
            hp: max_hp,
            max_hp,
            mana: max_mana,
            max_mana,
            abilities,
            ultimate: AbilitySlot::scaled(&definition.ultimate, progression, config),
            passive: definition.passive.clone(),
            status: StatusSet::default(),
        })
    }

    // ===== vitals =====

    #[inline]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    #[inline]
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    #[inline]
    pub fn mana(&self) -> u32 {
        self.mana
    }

    #[inline]
    pub fn max_mana(&self) -> u32 {
        self.max_mana
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Sets HP, clamped to `max_hp`. Used for scenario setup and save restoration.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Sets mana, clamped to `max_mana`.
    pub fn set_mana(&mut self, mana: u32) {
        self.mana = mana.min(self.max_mana);
    }

    /// `hp = max(0, hp - amount)`, unless invincible or already defeated.
    pub fn apply_damage(&mut self, amount: u32) -> DamageApplied {
        if self.is_defeated() {
            return DamageApplied::default();
        }
        if self.status.invincible > 0 {
            return DamageApplied {
                blocked: true,
                ..DamageApplied::default()
            };
        }

        let lost = amount.min(self.hp);
        self.hp -= lost;
        DamageApplied {
            lost,
            defeated: lost > 0 && self.hp == 0,
            blocked: false,
        }
    }

    /// `hp = min(max_hp, hp + amount)`. Returns the HP actually restored.
    pub fn apply_heal(&mut self, amount: u32) -> u32 {
        if self.is_defeated() {
            return 0;
        }
        let healed = amount.min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    pub fn spend_mana(&mut self, amount: u32) -> Result<(), CombatantError> {
        if self.mana < amount {
            return Err(CombatantError::InsufficientMana {
                required: amount,
                available: self.mana,
            });
        }
        self.mana -= amount;
        Ok(())
    }

    /// Restores mana up to `max_mana`. Returns the mana actually restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        if self.is_defeated() {
            return 0;
        }
        let restored = amount.min(self.max_mana - self.mana);
        self.mana += restored;
        restored
    }

    // ===== ticks =====

    /// Regen passive, then pending burn (which is cleared).
    pub fn tick_statuses_start_of_turn(&mut self) -> StartOfTurnTick {
        let mut tick = StartOfTurnTick::default();
        if self.is_defeated() {
            return tick;
        }

        let regen = self.passive_effect().map_or(0, |effect| effect.regen());
        if regen > 0 {
            tick.regen = self.apply_heal(regen);
        }

        if self.status.burning > 0 {
            let burn = self.status.burning;
            self.status.burning = 0;
            tick.burn = Some(self.apply_damage(burn));
        }

        tick
    }

    /// Cooldowns drop by `1 + cooldown_reduction`; timed statuses drop by one.
    pub fn tick_cooldowns_end_of_turn(&mut self, cooldown_reduction: u32) {
        if self.is_defeated() {
            return;
        }
        let step = cooldown_reduction.saturating_add(1);
        for slot in self
            .abilities
            .iter_mut()
            .chain(core::iter::once(&mut self.ultimate))
        {
            slot.current_cooldown = slot.current_cooldown.saturating_sub(step);
        }
        self.status.tick_down();
    }

    // ===== queries =====

    /// Alive and not stunned.
    #[inline]
    pub fn can_act(&self) -> bool {
        self.is_alive() && self.status.stunned == 0
    }

    /// Off cooldown and affordable after passive mana reduction.
    pub fn can_use_ability(&self, choice: AbilityChoice) -> bool {
        self.ability(choice).is_some_and(|slot| {
            slot.is_ready() && self.effective_mana_cost(&slot.definition) <= self.mana
        })
    }

    /// Every ability (ultimate last) that [`Self::can_use_ability`] accepts.
    pub fn usable_abilities(&self) -> impl Iterator<Item = AbilityChoice> + '_ {
        (0..self.abilities.len())
            .map(AbilityChoice::Slot)
            .chain(core::iter::once(AbilityChoice::Ultimate))
            .filter(|choice| self.can_use_ability(*choice))
    }

    pub fn effective_mana_cost(&self, ability: &AbilityDefinition) -> u32 {
        let reduction = self
            .passive_effect()
            .map_or(0, |effect| effect.mana_reduction());
        ability.mana_cost.saturating_sub(reduction)
    }

    pub fn ability(&self, choice: AbilityChoice) -> Option<&AbilitySlot> {
        match choice {
            AbilityChoice::Slot(index) => self.abilities.get(index),
            AbilityChoice::Ultimate => Some(&self.ultimate),
        }
    }

    pub fn abilities(&self) -> &[AbilitySlot] {
        &self.abilities
    }

    pub fn ultimate(&self) -> &AbilitySlot {
        &self.ultimate
    }

    /// Puts an ability on its full cooldown. Returns false for an unknown slot.
    pub fn commit_cooldown(&mut self, choice: AbilityChoice) -> bool {
        let slot = match choice {
            AbilityChoice::Slot(index) => self.abilities.get_mut(index),
            AbilityChoice::Ultimate => Some(&mut self.ultimate),
        };
        match slot {
            Some(slot) => {
                slot.current_cooldown = slot.definition.cooldown;
                true
            }
            None => false,
        }
    }

    /// Overrides the remaining cooldown of one ability.
    pub fn set_cooldown(&mut self, choice: AbilityChoice, turns: u32) -> bool {
        let slot = match choice {
            AbilityChoice::Slot(index) => self.abilities.get_mut(index),
            AbilityChoice::Ultimate => Some(&mut self.ultimate),
        };
        slot.map(|slot| slot.current_cooldown = turns).is_some()
    }

    // ===== passive hooks =====

    #[inline]
    pub fn passive_effect(&self) -> Option<PassiveEffect> {
        self.passive.as_ref().map(|passive| passive.effect)
    }

    pub fn cooldown_reduction(&self) -> u32 {
        self.passive_effect()
            .map_or(0, |effect| effect.cooldown_reduction())
    }

    pub fn dodge_pct(&self) -> u32 {
        self.passive_effect().map_or(0, |effect| effect.dodge_pct())
    }
}

/// Unchecked, field-for-field form of a [`Combatant`] for saves.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantRecord {
    pub character_id: String,
    pub name: String,
    pub rarity: Rarity,
    pub hp: u32,
    pub max_hp: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub abilities: ArrayVec<AbilitySlot, { BattleConfig::MAX_ABILITIES }>,
    pub ultimate: AbilitySlot,
    pub passive: Option<PassiveDefinition>,
    pub status: StatusSet,
}

impl From<Combatant> for CombatantRecord {
    fn from(combatant: Combatant) -> Self {
        Self {
            character_id: combatant.character_id,
            name: combatant.name,
            rarity: combatant.rarity,
            hp: combatant.hp,
            max_hp: combatant.max_hp,
            mana: combatant.mana,
            max_mana: combatant.max_mana,
            abilities: combatant.abilities,
            ultimate: combatant.ultimate,
            passive: combatant.passive,
            status: combatant.status,
        }
    }
}

impl TryFrom<CombatantRecord> for Combatant {
    type Error = CombatantError;

    fn try_from(record: CombatantRecord) -> Result<Self, Self::Error> {
        if record.max_hp == 0 || record.hp > record.max_hp {
            return Err(CombatantError::HpOutOfRange {
                hp: record.hp,
                max_hp: record.max_hp,
            });
        }
        if record.mana > record.max_mana {
            return Err(CombatantError::ManaOutOfRange {
                mana: record.mana,
                max_mana: record.max_mana,
            });
        }
        Ok(Self {
            character_id: record.character_id,
            name: record.name,
            rarity: record.rarity,
            hp: record.hp,
            max_hp: record.max_hp,
            mana: record.mana,
            max_mana: record.max_mana,
            abilities: record.abilities,
            ultimate: record.ultimate,
            passive: record.passive,
            status: record.status,
        })
    }
}

fn validate_definition(definition: &CharacterDefinition) -> Result<(), SetupError> {
    if definition.stats.max_hp == 0 {
        return Err(SetupError::ZeroHp {
            id: definition.id.clone(),
        });
    }
    if definition.abilities.is_empty() {
        return Err(SetupError::NoAbilities {
            id: definition.id.clone(),
        });
    }
    if definition.abilities.len() > BattleConfig::MAX_ABILITIES {
        return Err(SetupError::TooManyAbilities {
            id: definition.id.clone(),
            count: definition.abilities.len(),
            max: BattleConfig::MAX_ABILITIES,
        });
    }
    for ability in definition
        .abilities
        .iter()
        .chain(core::iter::once(&definition.ultimate))
    {
        let Some(status) = ability.status else {
            continue;
        };
        if status.chance_pct > 100 {
            return Err(SetupError::InvalidChance {
                id: definition.id.clone(),
                ability: ability.id.clone(),
                chance_pct: status.chance_pct,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AbilityKind, BaseStats};

    fn definition(passive: Option<PassiveEffect>) -> CharacterDefinition {
        let strike = AbilityDefinition::new("strike", "Strike", AbilityKind::Attack)
            .with_damage(30)
            .with_cooldown(2)
            .with_mana_cost(10);
        let ultimate = AbilityDefinition::new("finale", "Finale", AbilityKind::UltimateSweep)
            .with_damage(60)
            .with_cooldown(5)
            .with_mana_cost(40);
        let mut definition = CharacterDefinition::new(
            "hero",
            "Hero",
            BaseStats::new(100, 50),
            vec![strike],
            ultimate,
        );
        if let Some(effect) = passive {
            definition = definition.with_passive(PassiveDefinition::new("Passive", effect));
        }
        definition
    }

    fn combatant(passive: Option<PassiveEffect>) -> Combatant {
        Combatant::from_definition(&definition(passive), Progression::BASE, &BattleConfig::default())
            .unwrap()
    }

    #[test]
    fn starts_fresh() {
        let hero = combatant(None);
        assert_eq!(hero.hp(), 100);
        assert_eq!(hero.mana(), 50);
        assert!(hero.abilities().iter().all(AbilitySlot::is_ready));
        assert!(hero.ultimate().is_ready());
        assert_eq!(hero.status, StatusSet::default());
    }

    #[test]
    fn damage_floors_at_zero_and_reports_defeat() {
        let mut hero = combatant(None);
        let first = hero.apply_damage(70);
        assert_eq!(first, DamageApplied { lost: 70, defeated: false, blocked: false });

        let second = hero.apply_damage(500);
        assert_eq!(second.lost, 30);
        assert!(second.defeated);
        assert_eq!(hero.hp(), 0);

        // Already defeated: nothing more to lose.
        assert_eq!(hero.apply_damage(10), DamageApplied::default());
    }

    #[test]
    fn invincible_blocks_damage() {
        let mut hero = combatant(None);
        hero.status.invincible = 1;
        let applied = hero.apply_damage(40);
        assert!(applied.blocked);
        assert_eq!(applied.lost, 0);
        assert_eq!(hero.hp(), 100);
    }

    #[test]
    fn heal_is_capped_by_missing_hp() {
        let mut hero = combatant(None);
        hero.set_hp(90);
        assert_eq!(hero.apply_heal(40), 10);
        assert_eq!(hero.hp(), 100);

        hero.set_hp(0);
        assert_eq!(hero.apply_heal(40), 0);
        assert!(hero.is_defeated());
    }

    #[test]
    fn spend_mana_rejects_overdraw() {
        let mut hero = combatant(None);
        hero.set_mana(5);
        assert_eq!(
            hero.spend_mana(10),
            Err(CombatantError::InsufficientMana { required: 10, available: 5 })
        );
        assert_eq!(hero.mana(), 5);
        assert_eq!(hero.spend_mana(5), Ok(()));
        assert_eq!(hero.mana(), 0);
    }

    #[test]
    fn start_of_turn_applies_regen_then_burn() {
        let mut hero = combatant(Some(PassiveEffect::Regen(8)));
        hero.set_hp(50);
        hero.status.burning = 15;

        let tick = hero.tick_statuses_start_of_turn();
        assert_eq!(tick.regen, 8);
        assert_eq!(tick.burn.map(|burn| burn.lost), Some(15));
        assert_eq!(hero.hp(), 43);
        assert_eq!(hero.status.burning, 0);
    }

    #[test]
    fn lethal_burn_clamps_to_zero() {
        let mut hero = combatant(None);
        hero.set_hp(10);
        hero.status.burning = 15;

        let tick = hero.tick_statuses_start_of_turn();
        let burn = tick.burn.unwrap();
        assert_eq!(burn.lost, 10);
        assert!(burn.defeated);
        assert_eq!(hero.hp(), 0);
        assert_eq!(hero.status.burning, 0);
        assert!(!hero.can_act());
    }

    #[test]
    fn defeated_combatants_skip_ticks() {
        let mut hero = combatant(Some(PassiveEffect::Regen(8)));
        hero.set_hp(0);
        hero.status.burning = 5;
        assert_eq!(hero.tick_statuses_start_of_turn(), StartOfTurnTick::default());
        assert_eq!(hero.hp(), 0);
    }

    #[test]
    fn cooldowns_tick_with_reduction() {
        let mut hero = combatant(Some(PassiveEffect::CooldownReduction(1)));
        assert!(hero.commit_cooldown(AbilityChoice::Slot(0)));
        assert!(hero.commit_cooldown(AbilityChoice::Ultimate));
        hero.status.stunned = 2;

        hero.tick_cooldowns_end_of_turn(hero.cooldown_reduction());
        assert_eq!(hero.abilities()[0].current_cooldown, 0);
        assert_eq!(hero.ultimate().current_cooldown, 3);
        assert_eq!(hero.status.stunned, 1);
    }

    #[test]
    fn ability_usability_honours_cooldown_and_mana_reduction() {
        let mut hero = combatant(Some(PassiveEffect::ManaReduction(5)));
        hero.set_mana(5);
        // 10 - 5 reduction = 5 mana
        assert!(hero.can_use_ability(AbilityChoice::Slot(0)));
        assert!(!hero.can_use_ability(AbilityChoice::Ultimate));

        hero.commit_cooldown(AbilityChoice::Slot(0));
        assert!(!hero.can_use_ability(AbilityChoice::Slot(0)));
        assert!(!hero.can_use_ability(AbilityChoice::Slot(3)));
        assert_eq!(hero.usable_abilities().count(), 0);
    }

    #[test]
    fn stunned_combatant_cannot_act() {
        let mut hero = combatant(None);
        hero.status.stunned = 1;
        assert!(!hero.can_act());
        hero.tick_cooldowns_end_of_turn(0);
        assert!(hero.can_act());
    }

    #[test]
    fn progression_scales_hp_and_ability_output() {
        let config = BattleConfig::default();
        let hero =
            Combatant::from_definition(&definition(None), Progression::new(11, 0), &config).unwrap();
        assert_eq!(hero.max_hp(), 150);
        assert_eq!(hero.abilities()[0].definition.damage, 45);
        assert_eq!(hero.ultimate().definition.damage, 90);
        assert_eq!(hero.max_mana(), 50);
    }

    #[test]
    fn rejects_definitions_without_abilities() {
        let mut broken = definition(None);
        broken.abilities.clear();
        let result =
            Combatant::from_definition(&broken, Progression::BASE, &BattleConfig::default());
        assert_eq!(result, Err(SetupError::NoAbilities { id: "hero".into() }));
    }

    #[test]
    fn records_round_trip_only_within_bounds() {
        let hero = combatant(None);
        let record = CombatantRecord::from(hero.clone());
        assert_eq!(Combatant::try_from(record.clone()), Ok(hero));

        let overhealed = CombatantRecord {
            hp: 101,
            ..record.clone()
        };
        assert_eq!(
            Combatant::try_from(overhealed),
            Err(CombatantError::HpOutOfRange {
                hp: 101,
                max_hp: 100
            })
        );

        let overcharged = CombatantRecord {
            mana: 60,
            ..record
        };
        assert_eq!(
            Combatant::try_from(overcharged),
            Err(CombatantError::ManaOutOfRange {
                mana: 60,
                max_mana: 50
            })
        );
    }
}
