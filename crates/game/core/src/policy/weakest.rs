use crate::env::BattleRng;

use super::{BattleView, OpponentPolicy, PlannedAction};

/// Random actor and ability like [`super::RandomPolicy`], but single-target
/// attacks go to the living enemy with the least HP.
#[derive(Clone, Copy, Debug, Default)]
pub struct FocusWeakestPolicy;

impl OpponentPolicy for FocusWeakestPolicy {
    fn choose(&self, view: &BattleView<'_>, rng: &mut dyn BattleRng) -> Option<PlannedAction> {
        let (actor, ability) = view.pick_action(rng)?;
        Some(PlannedAction {
            actor,
            ability,
            target: view.target_for(actor, ability, BattleView::weakest_enemy),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{
        AbilityDefinition, AbilityKind, BaseStats, CharacterDefinition, Progression, SequenceRng,
    };
    use crate::state::Combatant;

    fn combatant(id: &str) -> Combatant {
        let definition = CharacterDefinition::new(
            id,
            id,
            BaseStats::new(100, 0),
            vec![AbilityDefinition::new("hit", "Hit", AbilityKind::Attack).with_damage(10)],
            AbilityDefinition::new("ult", "Ult", AbilityKind::UltimateSweep).with_cooldown(3),
        );
        Combatant::from_definition(&definition, Progression::BASE, &BattleConfig::default())
            .unwrap()
    }

    #[test]
    fn focuses_lowest_hp_enemy() {
        let mut acting: Vec<_> = (0..3).map(|i| combatant(&format!("o{i}"))).collect();
        for combatant in &mut acting {
            combatant.commit_cooldown(crate::state::AbilityChoice::Ultimate);
        }
        let mut opposing: Vec<_> = (0..3).map(|i| combatant(&format!("p{i}"))).collect();
        opposing[0].set_hp(0);
        opposing[1].set_hp(60);
        opposing[2].set_hp(35);
        let mut rng = SequenceRng::new(vec![0.0]);

        let plan = FocusWeakestPolicy
            .choose(&BattleView::new(&acting, &opposing), &mut rng)
            .unwrap();
        assert_eq!(plan.target, Some(2));
    }
}
