//! Target-side hit checks.
//!
//! Whether a hit lands is the target's business (invincibility, dodge
//! passive). The orchestrator owns the random source, so it hands the
//! resolver a [`HitGuard`] instead of letting the resolver roll dice.

use crate::env::BattleRng;
use crate::state::Combatant;

/// Verdict for one incoming hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitCheck {
    Land,
    /// Negated by a dodge roll.
    Dodged,
    /// Negated by invincibility.
    Blocked,
}

/// The orchestrator's dodge, invincibility and proc check, injected into
/// [`super::resolve_ability`].
///
/// The resolver asks it once per hit and once per status proc. The engine
/// supplies a [`RollingGuard`] over the battle's random source.
pub trait HitGuard {
    /// Decide whether a hit against `target` lands.
    fn check(&mut self, target: &Combatant) -> HitCheck;

    /// Roll a status-effect proc.
    fn proc(&mut self, chance_pct: u8) -> bool;
}

/// Guard backed by the battle's random source.
///
/// Invincibility is checked first and never consumes a roll; a dodge roll is
/// only made when the target has a dodge-chance passive.
pub struct RollingGuard<'a> {
    rng: &'a mut dyn BattleRng,
}

impl<'a> RollingGuard<'a> {
    pub fn new(rng: &'a mut dyn BattleRng) -> Self {
        Self { rng }
    }
}

impl HitGuard for RollingGuard<'_> {
    fn check(&mut self, target: &Combatant) -> HitCheck {
        if target.status.invincible > 0 {
            return HitCheck::Blocked;
        }
        let dodge = target.dodge_pct();
        if dodge > 0 && self.rng.chance(dodge) {
            return HitCheck::Dodged;
        }
        HitCheck::Land
    }

    fn proc(&mut self, chance_pct: u8) -> bool {
        match chance_pct {
            0 => false,
            100.. => true,
            pct => self.rng.chance(u32::from(pct)),
        }
    }
}
