//! Pre-resolution action checks shared by both sides.

use crate::state::{AbilityChoice, BattleState, Side};

use super::errors::ActionError;

/// Checks that `state.team(side)[actor]` may use `ability` on `target` now.
///
/// Pure: never touches the state, so re-validating the same action always
/// yields the same result.
pub(crate) fn validate_action(
    state: &BattleState,
    side: Side,
    actor: usize,
    ability: AbilityChoice,
    target: Option<usize>,
) -> Result<(), ActionError> {
    let outcome = state.outcome();
    if outcome.is_terminal() {
        return Err(ActionError::BattleOver { outcome });
    }

    let combatant = state
        .combatant(side, actor)
        .ok_or(ActionError::UnknownActor { slot: actor })?;
    if combatant.is_defeated() {
        return Err(ActionError::ActorDefeated {
            name: combatant.name.clone(),
        });
    }
    if combatant.status.stunned > 0 {
        return Err(ActionError::ActorStunned {
            name: combatant.name.clone(),
            turns: combatant.status.stunned,
        });
    }

    let slot = combatant
        .ability(ability)
        .ok_or_else(|| ActionError::UnknownAbility {
            name: combatant.name.clone(),
            ability,
        })?;
    let definition = &slot.definition;
    if !slot.is_ready() {
        return Err(ActionError::OnCooldown {
            ability: definition.name.clone(),
            turns: slot.current_cooldown,
        });
    }
    let required = combatant.effective_mana_cost(definition);
    if required > combatant.mana() {
        return Err(ActionError::InsufficientMana {
            ability: definition.name.clone(),
            required,
            available: combatant.mana(),
        });
    }

    let requirement = definition.target_requirement();
    if !requirement.needs_target() {
        return Ok(());
    }
    let index = target.ok_or_else(|| ActionError::MissingTarget {
        ability: definition.name.clone(),
    })?;
    let target_side = if requirement.targets_allies() {
        side
    } else {
        side.opposite()
    };
    let target = state
        .combatant(target_side, index)
        .ok_or(ActionError::UnknownTarget { slot: index })?;
    if target.is_defeated() {
        return Err(ActionError::TargetDefeated {
            name: target.name.clone(),
        });
    }
    Ok(())
}

/// Checks that `side` may forfeit its action this turn.
///
/// Passing is only allowed when no living member of `side` can act and pay
/// for at least one ready ability.
pub(crate) fn validate_pass(state: &BattleState, side: Side) -> Result<(), ActionError> {
    let outcome = state.outcome();
    if outcome.is_terminal() {
        return Err(ActionError::BattleOver { outcome });
    }
    match state
        .team(side)
        .iter()
        .find(|combatant| combatant.can_act() && combatant.usable_abilities().next().is_some())
    {
        Some(combatant) => Err(ActionError::CanStillAct {
            name: combatant.name.clone(),
        }),
        None => Ok(()),
    }
}
