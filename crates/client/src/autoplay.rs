//! Policy-driven battle loop.
//!
//! Both sides are automated: the player side's plan comes from a policy that
//! sees the battle from the player's perspective and is submitted through the
//! same `submit_player_action` path an interactive UI would use. When the
//! policy finds nothing usable the player side passes its turn.

use anyhow::{Context, Result};
use battle_core::{
    BattleConfig, BattleEnv, BattleRng, BattleState, BattleSummary, BattleView, OpponentPolicy,
    PlayerAction, pass_turn, submit_player_action,
};
use serde::Serialize;

/// Why the battle loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StopReason {
    /// The battle reached a win or a loss.
    Finished,
    /// The turn limit was reached first.
    TurnLimit,
}

/// Final JSON read-out of a simulated battle.
#[derive(Clone, Debug, Serialize)]
pub struct SimReport {
    pub seed: u64,
    pub stop: StopReason,
    #[serde(flatten)]
    pub summary: BattleSummary,
}

/// Runs a battle to completion with a policy on each side.
pub struct Autoplay<'a> {
    config: &'a BattleConfig,
    player_policy: &'a dyn OpponentPolicy,
    opponent_policy: &'a dyn OpponentPolicy,
    max_turns: u32,
}

impl<'a> Autoplay<'a> {
    pub fn new(
        config: &'a BattleConfig,
        player_policy: &'a dyn OpponentPolicy,
        opponent_policy: &'a dyn OpponentPolicy,
        max_turns: u32,
    ) -> Self {
        Self {
            config,
            player_policy,
            opponent_policy,
            max_turns,
        }
    }

    /// Plays turns until the battle ends or hits the turn limit.
    ///
    /// `on_turn` receives the log lines of every completed turn.
    pub fn run(
        &self,
        state: &mut BattleState,
        rng: &mut dyn BattleRng,
        mut on_turn: impl FnMut(u32, &[String]),
    ) -> Result<StopReason> {
        loop {
            if state.outcome().is_terminal() {
                return Ok(StopReason::Finished);
            }
            if state.turn() > self.max_turns {
                tracing::warn!(max_turns = self.max_turns, "turn limit reached");
                return Ok(StopReason::TurnLimit);
            }

            let plan = {
                let view = BattleView::new(state.players(), state.opponents());
                self.player_policy.choose(&view, &mut *rng)
            };
            let turn = state.turn();
            let mut env = BattleEnv::new(self.config, &mut *rng, self.opponent_policy);
            let report = match plan {
                Some(plan) => submit_player_action(state, &mut env, PlayerAction::from(plan))
                    .with_context(|| format!("player policy submitted {plan:?} on turn {turn}"))?,
                None => {
                    tracing::info!(turn, "no player combatant has a usable action, passing");
                    pass_turn(state, &mut env)
                        .with_context(|| format!("player side could not pass on turn {turn}"))?
                }
            };

            on_turn(report.turn, &report.lines());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_content::ContentFactory;
    use battle_core::{FocusWeakestPolicy, Outcome, PcgRng, RandomPolicy, Side, start_battle};

    fn bundled_battle() -> (BattleConfig, BattleState) {
        let factory = ContentFactory::bundled();
        let config = factory.load_config().unwrap();
        let catalog = factory.load_characters().unwrap();
        let roster = |ids: [&str; 3]| -> Vec<_> {
            ids.iter().map(|id| catalog.get(id).unwrap().clone()).collect()
        };
        let state = start_battle(
            &roster(["aria", "bram", "cleo"]),
            &roster(["dax", "esme", "fenn"]),
            &config,
        )
        .unwrap();
        (config, state)
    }

    #[test]
    fn autoplay_reaches_an_outcome() {
        let (config, mut state) = bundled_battle();
        let mut rng = PcgRng::seed_from_u64(7);
        let mut turns = Vec::new();

        let stop = Autoplay::new(&config, &FocusWeakestPolicy, &RandomPolicy, 500)
            .run(&mut state, &mut rng, |turn, _| turns.push(turn))
            .unwrap();

        if stop == StopReason::Finished {
            assert_ne!(state.outcome(), Outcome::InProgress);
        }
        assert!(!turns.is_empty());
        assert!(turns.windows(2).all(|pair| pair[1] == pair[0] + 1));
    }

    #[test]
    fn same_seed_replays_the_same_battle() {
        let play = |seed| {
            let (config, mut state) = bundled_battle();
            let mut rng = PcgRng::seed_from_u64(seed);
            Autoplay::new(&config, &RandomPolicy, &RandomPolicy, 100)
                .run(&mut state, &mut rng, |_, _| {})
                .unwrap();
            state
        };

        assert_eq!(play(3), play(3));
    }

    #[test]
    fn turn_limit_stops_the_loop() {
        let (config, mut state) = bundled_battle();
        let mut rng = PcgRng::seed_from_u64(1);

        let stop = Autoplay::new(&config, &RandomPolicy, &RandomPolicy, 1)
            .run(&mut state, &mut rng, |_, _| {})
            .unwrap();

        if state.outcome() == Outcome::InProgress {
            assert_eq!(stop, StopReason::TurnLimit);
            assert_eq!(state.turn(), 2);
        }
    }

    #[test]
    fn stunned_player_side_passes_instead_of_stopping() {
        let (config, mut state) = bundled_battle();
        for slot in 0..3 {
            state.combatant_mut(Side::Player, slot).unwrap().status.stunned = 1;
        }
        let mut rng = PcgRng::seed_from_u64(5);
        let mut first = Vec::new();

        Autoplay::new(&config, &FocusWeakestPolicy, &RandomPolicy, 2)
            .run(&mut state, &mut rng, |turn, lines| {
                if turn == 1 {
                    first = lines.to_vec();
                }
            })
            .unwrap();

        assert!(first.contains(&"The player team has no available action".to_string()));
        assert!(state.turn() > 1 || state.outcome() != Outcome::InProgress);
    }

    #[test]
    fn report_serializes_flat() {
        let (_, state) = bundled_battle();
        let report = SimReport {
            seed: 9,
            stop: StopReason::TurnLimit,
            summary: state.summary(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stop"], "turn-limit");
        assert_eq!(json["outcome"], "in-progress");
        assert_eq!(json["turns"], 1);
    }
}
