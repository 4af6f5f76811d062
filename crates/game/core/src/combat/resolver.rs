//! Ability resolution.
//!
//! [`resolve_ability`] applies one ability from a caster on `allies` to its
//! target(s) and returns the events it produced. Targets are validated before
//! anything is mutated, so an error always leaves both teams untouched.
//! Hit outcomes come from the [`HitGuard`] the orchestrator injects.

use crate::env::{AbilityDefinition, AbilityKind, StatusKind};
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{AbilityChoice, BattleEvent, Combatant, CombatantError, Participant, Side};

use super::damage::{compute_damage, damage_taken};
use super::hit::{HitCheck, HitGuard};

/// Resolver-level target errors.
///
/// The orchestrator validates every action first, so reaching one of these
/// through a public entry point is a bug.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveError {
    #[error("ability '{ability}' requires a target")]
    MissingTarget { ability: String },

    #[error("invalid target: {side} slot {slot} is missing or defeated")]
    InvalidTarget { side: Side, slot: usize },

    #[error("invalid caster: {side} slot {slot} is missing or defeated")]
    InvalidCaster { side: Side, slot: usize },

    #[error("{side} slot {slot} has no {ability}")]
    UnknownAbility {
        side: Side,
        slot: usize,
        ability: AbilityChoice,
    },

    #[error("caster cannot pay for the ability: {0}")]
    Unaffordable(#[from] CombatantError),
}

impl BattleError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTarget { .. } => "RESOLVE_MISSING_TARGET",
            Self::InvalidTarget { .. } => "RESOLVE_INVALID_TARGET",
            Self::InvalidCaster { .. } => "RESOLVE_INVALID_CASTER",
            Self::UnknownAbility { .. } => "RESOLVE_UNKNOWN_ABILITY",
            Self::Unaffordable(_) => "RESOLVE_UNAFFORDABLE",
        }
    }
}

/// Resolves `ability` cast by `allies[caster]`.
///
/// `target` indexes `foes` for enemy-targeting kinds and `allies` for
/// `heal-ally`; it is ignored by kinds that pick their own targets.
///
/// `guard` is the orchestrator's dodge, invincibility and status-proc check.
/// Every hit and every proc roll goes through it, which keeps the resolver
/// free of randomness; tests pass a scripted guard.
pub fn resolve_ability(
    side: Side,
    caster: usize,
    ability: &AbilityDefinition,
    allies: &mut [Combatant],
    foes: &mut [Combatant],
    target: Option<usize>,
    guard: &mut dyn HitGuard,
) -> Result<Vec<BattleEvent>, ResolveError> {
    let target = validate_targets(side, caster, ability, allies, foes, target)?;

    let mut resolution = Resolution {
        side,
        caster,
        ability,
        allies,
        foes,
        guard,
        events: Vec::new(),
    };
    let damage = compute_damage(&resolution.allies[caster], ability.damage);

    use AbilityKind::*;
    match (ability.kind, target) {
        (Attack, Some(slot)) => {
            resolution.strike(slot, damage);
        }
        (AttackAll | UltimateSweep, _) => {
            resolution.sweep(damage);
        }
        (AttackStun, Some(slot)) => {
            if resolution.strike(slot, damage) == HitCheck::Land && resolution.foes[slot].is_alive()
            {
                resolution.stun(slot, ability.stun_duration);
            }
        }
        (StunOnly, Some(slot)) => {
            resolution.stun(slot, ability.stun_duration);
            resolution.apply_status(slot);
        }
        (Defensive, _) => resolution.shield_caster(1),
        (Buff, _) => resolution.buff_caster(),
        (HealSelf, _) => resolution.heal(caster, ability.heal),
        (HealAll, _) => resolution.heal_all(ability.heal),
        (HealAlly, Some(slot)) => resolution.heal(slot, ability.heal),
        (UltimateSweepHeal, _) => {
            resolution.sweep(damage);
            resolution.heal_all(ability.heal);
        }
        (UltimateStrikeGuard, Some(slot)) => {
            resolution.strike(slot, damage);
            resolution.shield_caster(ability.duration.max(1));
        }
        (UltimateSweepStun, _) => {
            for slot in resolution.sweep(damage) {
                resolution.stun(slot, ability.stun_duration);
            }
        }
        (Attack | AttackStun | StunOnly | HealAlly | UltimateStrikeGuard, None) => {
            return Err(ResolveError::MissingTarget {
                ability: ability.id.clone(),
            });
        }
    }

    Ok(resolution.events)
}

/// Checks caster and target before any mutation.
///
/// Returns the target slot for kinds that need one.
fn validate_targets(
    side: Side,
    caster: usize,
    ability: &AbilityDefinition,
    allies: &[Combatant],
    foes: &[Combatant],
    target: Option<usize>,
) -> Result<Option<usize>, ResolveError> {
    if !allies.get(caster).is_some_and(Combatant::is_alive) {
        return Err(ResolveError::InvalidCaster { side, slot: caster });
    }

    let requirement = ability.target_requirement();
    if !requirement.needs_target() {
        return Ok(None);
    }

    let slot = target.ok_or_else(|| ResolveError::MissingTarget {
        ability: ability.id.clone(),
    })?;
    let (target_side, team) = if requirement.targets_allies() {
        (side, allies)
    } else {
        (side.opposite(), foes)
    };
    if !team.get(slot).is_some_and(Combatant::is_alive) {
        return Err(ResolveError::InvalidTarget {
            side: target_side,
            slot,
        });
    }
    Ok(Some(slot))
}

struct Resolution<'a, G: HitGuard + ?Sized> {
    side: Side,
    caster: usize,
    ability: &'a AbilityDefinition,
    allies: &'a mut [Combatant],
    foes: &'a mut [Combatant],
    guard: &'a mut G,
    events: Vec<BattleEvent>,
}

impl<G: HitGuard + ?Sized> Resolution<'_, G> {
    fn ally(&self, slot: usize) -> Participant {
        Participant::new(self.side, slot, self.allies[slot].name.clone())
    }

    fn foe(&self, slot: usize) -> Participant {
        Participant::new(self.side.opposite(), slot, self.foes[slot].name.clone())
    }

    /// One damaging hit on `foes[slot]`, gated by the target's defences.
    fn strike(&mut self, slot: usize, damage: u32) -> HitCheck {
        let source = self.ally(self.caster);
        let target = self.foe(slot);

        match self.guard.check(&self.foes[slot]) {
            HitCheck::Blocked => {
                self.events.push(BattleEvent::Blocked { source, target });
                return HitCheck::Blocked;
            }
            HitCheck::Dodged => {
                self.events.push(BattleEvent::Dodged { source, target });
                return HitCheck::Dodged;
            }
            HitCheck::Land => {}
        }

        let amount = damage_taken(&self.foes[slot], damage);
        let applied = self.foes[slot].apply_damage(amount);
        if applied.blocked {
            self.events.push(BattleEvent::Blocked { source, target });
            return HitCheck::Blocked;
        }

        self.events.push(BattleEvent::Damage {
            source,
            target: target.clone(),
            amount: applied.lost,
        });
        if applied.defeated {
            self.events.push(BattleEvent::Defeated { target });
            return HitCheck::Land;
        }

        self.apply_status(slot);
        let burn = self.allies[self.caster]
            .passive_effect()
            .and_then(|effect| effect.burn_on_hit());
        if let Some(amount) = burn {
            self.foes[slot].status.ignite(amount);
            self.events.push(BattleEvent::Burning { target, amount });
        }
        HitCheck::Land
    }

    /// Hits every living foe with the same damage. Returns the slots hit that
    /// are still alive.
    fn sweep(&mut self, damage: u32) -> Vec<usize> {
        let mut landed = Vec::new();
        for slot in 0..self.foes.len() {
            if self.foes[slot].is_defeated() {
                continue;
            }
            if self.strike(slot, damage) == HitCheck::Land && self.foes[slot].is_alive() {
                landed.push(slot);
            }
        }
        landed
    }

    fn stun(&mut self, slot: usize, turns: u32) {
        if turns == 0 {
            return;
        }
        self.foes[slot].status.stun(turns);
        let target = self.foe(slot);
        self.events.push(BattleEvent::Stunned { target, turns });
    }

    /// Rolls the ability's status payload against `foes[slot]`.
    fn apply_status(&mut self, slot: usize) {
        let Some(payload) = self.ability.status else {
            return;
        };
        if !self.guard.proc(payload.chance_pct) {
            return;
        }

        let target = self.foe(slot);
        let status = &mut self.foes[slot].status;
        let event = match payload.kind {
            StatusKind::Stun => {
                status.stun(payload.duration);
                BattleEvent::Stunned {
                    target,
                    turns: payload.duration,
                }
            }
            StatusKind::Burn => {
                status.ignite(payload.magnitude);
                BattleEvent::Burning {
                    target,
                    amount: payload.magnitude,
                }
            }
            StatusKind::Mark => {
                status.mark(payload.magnitude, payload.duration);
                BattleEvent::Marked {
                    target,
                    bonus: payload.magnitude,
                    turns: payload.duration,
                }
            }
        };
        self.events.push(event);
    }

    fn shield_caster(&mut self, turns: u32) {
        self.allies[self.caster].status.invincible = turns;
        let target = self.ally(self.caster);
        self.events.push(BattleEvent::Invincible { target, turns });
    }

    fn buff_caster(&mut self) {
        let amount = self.ability.buff_amount;
        let turns = self.ability.duration;
        let status = &mut self.allies[self.caster].status;
        status.buff(amount, turns);
        let total = status.attack_buff;

        let target = self.ally(self.caster);
        self.events.push(BattleEvent::Buffed {
            target,
            amount,
            total,
            turns,
        });
    }

    /// Heals `allies[slot]`; over-heal and dead allies produce no event.
    fn heal(&mut self, slot: usize, amount: u32) {
        let healed = self.allies[slot].apply_heal(amount);
        if healed == 0 {
            return;
        }
        let source = self.ally(self.caster);
        let target = self.ally(slot);
        self.events.push(BattleEvent::Healed {
            source,
            target,
            amount: healed,
        });
    }

    fn heal_all(&mut self, amount: u32) {
        for slot in 0..self.allies.len() {
            self.heal(slot, amount);
        }
    }
}
