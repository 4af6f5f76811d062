//! Damage calculation.

use crate::state::Combatant;

/// Calculate outgoing damage for an ability.
///
/// # Formula
///
/// ```text
/// damage = base_damage + attack_buff
/// if damage-boost passive:
///     damage = floor(damage * (100 + boost_pct) / 100)
/// ```
///
/// Level / limit-break scaling is already folded into `base_damage` when the
/// combatant is built, so no further scaling happens here.
pub fn compute_damage(attacker: &Combatant, base_damage: u32) -> u32 {
    let damage = base_damage.saturating_add(attacker.status.attack_buff);

    let boost = attacker
        .passive_effect()
        .map_or(0, |effect| effect.damage_boost_pct());
    if boost == 0 {
        return damage;
    }

    let boosted = u64::from(damage) * u64::from(100u32.saturating_add(boost)) / 100;
    u32::try_from(boosted).unwrap_or(u32::MAX)
}

/// Damage a landed hit deals to `target`, including its mark bonus.
pub fn damage_taken(target: &Combatant, damage: u32) -> u32 {
    damage.saturating_add(target.status.marked)
}
