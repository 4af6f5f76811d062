//! Battle events and the append-only battle log.
//!
//! Every log line is rendered from a typed [`BattleEvent`]; the UI can either
//! print the lines or match on the events.

use core::fmt;

use crate::engine::ActionError;

use super::Side;

/// A combatant as named in an event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub side: Side,
    pub slot: usize,
    pub name: String,
}

impl Participant {
    pub fn new(side: Side, slot: usize, name: impl Into<String>) -> Self {
        Self {
            side,
            slot,
            name: name.into(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Something that happened during a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    AbilityUsed {
        actor: Participant,
        ability: String,
        ultimate: bool,
    },
    Damage {
        source: Participant,
        target: Participant,
        amount: u32,
    },
    /// Invincibility negated a hit.
    Blocked {
        source: Participant,
        target: Participant,
    },
    Dodged {
        source: Participant,
        target: Participant,
    },
    Healed {
        source: Participant,
        target: Participant,
        amount: u32,
    },
    Stunned {
        target: Participant,
        turns: u32,
    },
    Burning {
        target: Participant,
        amount: u32,
    },
    Marked {
        target: Participant,
        bonus: u32,
        turns: u32,
    },
    Invincible {
        target: Participant,
        turns: u32,
    },
    Buffed {
        target: Participant,
        amount: u32,
        total: u32,
        turns: u32,
    },
    Regen {
        target: Participant,
        amount: u32,
    },
    BurnTick {
        target: Participant,
        amount: u32,
    },
    BurnResisted {
        target: Participant,
    },
    Defeated {
        target: Participant,
    },
    CannotAct {
        target: Participant,
        turns: u32,
    },
    NoAction {
        side: Side,
    },
    /// A submitted action failed validation; nothing else changed.
    Rejected {
        reason: ActionError,
    },
    Victory,
    Defeat,
}

impl BattleEvent {
    /// Returns true for the warning emitted by a rejected action.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BattleEvent::*;
        match self {
            AbilityUsed {
                actor,
                ability,
                ultimate: false,
            } => write!(f, "{actor} uses {ability}!"),
            AbilityUsed {
                actor,
                ability,
                ultimate: true,
            } => write!(f, "{actor} unleashes their ultimate, {ability}!"),
            Damage {
                source,
                target,
                amount,
            } => write!(f, "{source} deals {amount} damage to {target}"),
            Blocked { source, target } => {
                write!(f, "{target} is invincible, {source}'s attack has no effect")
            }
            Dodged { source, target } => write!(f, "{target} dodged {source}'s attack"),
            Healed {
                source,
                target,
                amount,
            } if source == target => write!(f, "{target} recovers {amount} HP"),
            Healed {
                source,
                target,
                amount,
            } => write!(f, "{source} heals {target} for {amount} HP"),
            Stunned { target, turns } => write!(f, "{target} is stunned for {turns} turn(s)"),
            Burning { target, amount } => write!(f, "{target} is burning ({amount} damage)"),
            Marked {
                target,
                bonus,
                turns,
            } => write!(
                f,
                "{target} is marked and takes +{bonus} damage for {turns} turn(s)"
            ),
            Invincible { target, .. } => write!(f, "{target} becomes invincible"),
            Buffed {
                target,
                amount,
                total,
                turns,
            } => write!(
                f,
                "{target} gains +{amount} attack (total +{total}) for {turns} turn(s)"
            ),
            Regen { target, amount } => write!(f, "{target} regenerates {amount} HP"),
            BurnTick { target, amount } => write!(f, "{target} takes {amount} burn damage"),
            BurnResisted { target } => write!(f, "{target} is invincible, the burn has no effect"),
            Defeated { target } => write!(f, "{target} has been defeated!"),
            CannotAct { target, .. } => write!(f, "{target} is stunned and can't act"),
            NoAction { side } => write!(f, "The {side} team has no available action"),
            Rejected { reason } => write!(f, "Warning: {reason}"),
            Victory => f.write_str("Victory! All opponents have been defeated."),
            Defeat => f.write_str("Defeat! All of your combatants have fallen."),
        }
    }
}

/// One log line with the turn it was produced on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub turn: u32,
    pub event: BattleEvent,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[turn {}] {}", self.turn, self.event)
    }
}

/// Append-only battle log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    entries: Vec<LogEntry>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, turn: u32, event: BattleEvent) {
        if event.is_warning() {
            tracing::warn!(turn, "{event}");
        } else {
            tracing::debug!(turn, "{event}");
        }
        self.entries.push(LogEntry { turn, event });
    }

    /// Drops entries appended after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries appended at or after `index`.
    pub fn since(&self, index: usize) -> &[LogEntry] {
        self.entries.get(index..).unwrap_or(&[])
    }

    /// Human-readable lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|entry| entry.event.to_string())
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_human_readable_lines() {
        let hero = Participant::new(Side::Player, 0, "Yuji");
        let foe = Participant::new(Side::Opponent, 1, "Curse");

        let mut log = BattleLog::new();
        log.push(
            1,
            BattleEvent::Damage {
                source: hero.clone(),
                target: foe.clone(),
                amount: 30,
            },
        );
        log.push(
            1,
            BattleEvent::Healed {
                source: hero.clone(),
                target: hero.clone(),
                amount: 12,
            },
        );
        log.push(1, BattleEvent::Blocked { source: foe, target: hero });

        let lines: Vec<String> = log.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Yuji deals 30 damage to Curse",
                "Yuji recovers 12 HP",
                "Yuji is invincible, Curse's attack has no effect",
            ]
        );
        assert_eq!(log.since(2).len(), 1);
        assert!(log.since(10).is_empty());
        assert_eq!(log.last().map(|entry| entry.turn), Some(1));
    }
}
