//! Automated action selection.
//!
//! An [`OpponentPolicy`] picks one action for a side nobody is steering. The
//! orchestrator validates whatever a policy proposes, so a policy can never
//! push the battle into an invalid state; a bad proposal is logged and the
//! side simply does nothing this turn.
//!
//! # Core Components
//!
//! - [`BattleView`]: read-only "blackboard" of both teams from the acting side
//! - [`RandomPolicy`]: uniform actor, uniform ability, first living target
//! - [`FocusWeakestPolicy`]: like [`RandomPolicy`] but targets the lowest-HP enemy

mod random;
mod weakest;

pub use random::RandomPolicy;
pub use weakest::FocusWeakestPolicy;

use crate::env::{BattleRng, TargetRequirement};
use crate::state::{AbilityChoice, Combatant};

/// One action chosen by a policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedAction {
    pub actor: usize,
    pub ability: AbilityChoice,
    pub target: Option<usize>,
}

/// Decision function for an automated side.
pub trait OpponentPolicy {
    /// Returns `None` when no combatant can act or nothing is usable.
    fn choose(&self, view: &BattleView<'_>, rng: &mut dyn BattleRng) -> Option<PlannedAction>;
}

/// Both teams as seen by the side about to act.
#[derive(Clone, Copy, Debug)]
pub struct BattleView<'a> {
    pub acting: &'a [Combatant],
    pub opposing: &'a [Combatant],
}

impl<'a> BattleView<'a> {
    pub fn new(acting: &'a [Combatant], opposing: &'a [Combatant]) -> Self {
        Self { acting, opposing }
    }

    /// Slots that can act and have at least one usable ability.
    pub fn eligible_actors(&self) -> impl Iterator<Item = usize> + '_ {
        self.acting
            .iter()
            .enumerate()
            .filter(|(_, combatant)| {
                combatant.can_act() && combatant.usable_abilities().next().is_some()
            })
            .map(|(slot, _)| slot)
    }

    pub fn first_living_enemy(&self) -> Option<usize> {
        self.opposing.iter().position(Combatant::is_alive)
    }

    /// Living enemy with the least HP; ties go to the earlier slot.
    pub fn weakest_enemy(&self) -> Option<usize> {
        self.opposing
            .iter()
            .enumerate()
            .filter(|(_, combatant)| combatant.is_alive())
            .min_by_key(|(slot, combatant)| (combatant.hp(), *slot))
            .map(|(slot, _)| slot)
    }

    /// First living ally missing HP, else `actor` itself.
    pub fn ally_to_heal(&self, actor: usize) -> usize {
        self.acting
            .iter()
            .position(|combatant| combatant.is_alive() && combatant.hp() < combatant.max_hp())
            .unwrap_or(actor)
    }

    /// Uniform pick among the eligible actors, then among that actor's
    /// usable abilities.
    pub(crate) fn pick_action(&self, rng: &mut dyn BattleRng) -> Option<(usize, AbilityChoice)> {
        let actors: Vec<usize> = self.eligible_actors().collect();
        if actors.is_empty() {
            return None;
        }
        let actor = actors[rng.pick(actors.len())];

        let abilities: Vec<AbilityChoice> = self.acting[actor].usable_abilities().collect();
        if abilities.is_empty() {
            return None;
        }
        let ability = abilities[rng.pick(abilities.len())];
        Some((actor, ability))
    }

    /// Target slot for `ability` using `enemy` for enemy-targeting kinds.
    pub(crate) fn target_for(
        &self,
        actor: usize,
        ability: AbilityChoice,
        enemy: impl FnOnce(&Self) -> Option<usize>,
    ) -> Option<usize> {
        let definition = &self.acting.get(actor)?.ability(ability)?.definition;
        match definition.target_requirement() {
            TargetRequirement::SingleEnemy => enemy(self),
            TargetRequirement::Ally => Some(self.ally_to_heal(actor)),
            TargetRequirement::AllEnemies
            | TargetRequirement::Caster
            | TargetRequirement::AllAllies => None,
        }
    }
}
