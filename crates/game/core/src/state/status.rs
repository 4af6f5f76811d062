//! Transient statuses carried by a combatant.
//!
//! Every counter is unsigned, so "never negative" holds by construction;
//! decrements saturate at zero.

/// Timed conditions on one combatant.
///
/// - `stunned`: turns remaining; blocks acting while non-zero
/// - `invincible`: turns remaining; blocks all incoming damage
/// - `burning`: flat damage taken at the next start-of-turn tick, then cleared
/// - `marked` / `mark_duration`: bonus damage taken from every landed hit
/// - `attack_buff` / `buff_duration`: flat outgoing damage bonus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSet {
    pub stunned: u32,
    pub invincible: u32,
    pub burning: u32,
    pub marked: u32,
    pub mark_duration: u32,
    pub attack_buff: u32,
    pub buff_duration: u32,
}

impl StatusSet {
    /// Overwrites any remaining stun.
    pub fn stun(&mut self, turns: u32) {
        self.stunned = turns;
    }

    /// Overwrites any pending burn.
    pub fn ignite(&mut self, amount: u32) {
        self.burning = amount;
    }

    pub fn mark(&mut self, bonus: u32, turns: u32) {
        self.marked = bonus;
        self.mark_duration = turns;
    }

    /// Buff amounts stack; the duration is reset to the latest cast.
    pub fn buff(&mut self, amount: u32, turns: u32) {
        self.attack_buff = self.attack_buff.saturating_add(amount);
        self.buff_duration = turns;
    }

    /// End-of-turn countdown.
    pub(crate) fn tick_down(&mut self) {
        self.invincible = self.invincible.saturating_sub(1);
        self.stunned = self.stunned.saturating_sub(1);

        self.buff_duration = self.buff_duration.saturating_sub(1);
        if self.buff_duration == 0 {
            self.attack_buff = 0;
        }

        self.mark_duration = self.mark_duration.saturating_sub(1);
        if self.mark_duration == 0 {
            self.marked = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffs_stack_but_duration_resets() {
        let mut status = StatusSet::default();
        status.buff(10, 3);
        status.tick_down();
        status.buff(5, 2);
        assert_eq!(status.attack_buff, 15);
        assert_eq!(status.buff_duration, 2);

        status.tick_down();
        assert_eq!(status.attack_buff, 15);
        status.tick_down();
        assert_eq!(status.attack_buff, 0);
        assert_eq!(status.buff_duration, 0);
    }

    #[test]
    fn stun_overwrites() {
        let mut status = StatusSet::default();
        status.stun(3);
        status.stun(1);
        assert_eq!(status.stunned, 1);
    }

    #[test]
    fn counters_floor_at_zero() {
        let mut status = StatusSet::default();
        status.tick_down();
        status.tick_down();
        assert_eq!(status, StatusSet::default());
    }

    #[test]
    fn mark_expires_with_duration() {
        let mut status = StatusSet::default();
        status.mark(7, 1);
        assert_eq!(status.marked, 7);
        status.tick_down();
        assert_eq!(status.marked, 0);
    }
}
