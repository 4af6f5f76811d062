use crate::env::BattleRng;

use super::{BattleView, OpponentPolicy, PlannedAction};

/// Default opponent behavior.
///
/// Uniform-random actor among those able to act, uniform-random ability
/// among its usable ones (ultimate included once ready), and the first
/// living enemy as target.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl OpponentPolicy for RandomPolicy {
    fn choose(&self, view: &BattleView<'_>, rng: &mut dyn BattleRng) -> Option<PlannedAction> {
        let (actor, ability) = view.pick_action(rng)?;
        Some(PlannedAction {
            actor,
            ability,
            target: view.target_for(actor, ability, BattleView::first_living_enemy),
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
    use crate::state::{AbilityChoice, Combatant};

    fn combatant(id: &str) -> Combatant {
        let definition = CharacterDefinition::new(
            id,
            id,
            BaseStats::new(100, 50),
            vec![
                AbilityDefinition::new("hit", "Hit", AbilityKind::Attack).with_damage(10),
                AbilityDefinition::new("mend", "Mend", AbilityKind::HealAlly).with_heal(10),
            ],
            AbilityDefinition::new("ult", "Ult", AbilityKind::UltimateSweep)
                .with_damage(40)
                .with_mana_cost(100),
        );
        Combatant::from_definition(&definition, Progression::BASE, &BattleConfig::default())
            .unwrap()
    }

    fn team(prefix: &str) -> Vec<Combatant> {
        (0..3).map(|i| combatant(&format!("{prefix}{i}"))).collect()
    }

    #[test]
    fn targets_first_living_enemy() {
        let acting = team("o");
        let mut opposing = team("p");
        opposing[0].set_hp(0);
        let view = BattleView::new(&acting, &opposing);
        // actor pick 0.0 -> slot 0, ability pick 0.0 -> Slot(0) attack
        let mut rng = SequenceRng::new(vec![0.0, 0.0]);

        let plan = RandomPolicy.choose(&view, &mut rng).unwrap();
        assert_eq!(
            plan,
            PlannedAction {
                actor: 0,
                ability: AbilityChoice::Slot(0),
                target: Some(1),
            }
        );
    }

    #[test]
    fn skips_stunned_actors_and_unaffordable_ultimate() {
        let mut acting = team("o");
        acting[0].status.stunned = 1;
        acting[1].set_hp(0);
        let opposing = team("p");
        let view = BattleView::new(&acting, &opposing);
        let mut rng = SequenceRng::new(vec![0.99, 0.99]);

        let plan = RandomPolicy.choose(&view, &mut rng).unwrap();
        assert_eq!(plan.actor, 2);
        // Ultimate costs more mana than available, so the last usable is Slot(1).
        assert_eq!(plan.ability, AbilityChoice::Slot(1));
        assert_eq!(plan.target, Some(2));
    }

    #[test]
    fn no_action_when_everyone_is_stunned() {
        let mut acting = team("o");
        for combatant in &mut acting {
            combatant.status.stunned = 2;
        }
        let opposing = team("p");
        let mut rng = SequenceRng::new(vec![0.5]);
        assert_eq!(
            RandomPolicy.choose(&BattleView::new(&acting, &opposing), &mut rng),
            None
        );
    }

    #[test]
    fn no_action_when_everything_is_on_cooldown() {
        let mut acting = team("o");
        for combatant in &mut acting {
            combatant.set_cooldown(AbilityChoice::Slot(0), 1);
            combatant.set_cooldown(AbilityChoice::Slot(1), 1);
        }
        let opposing = team("p");
        let mut rng = SequenceRng::new(vec![0.5]);
        assert_eq!(
            RandomPolicy.choose(&BattleView::new(&acting, &opposing), &mut rng),
            None
        );
    }
}
