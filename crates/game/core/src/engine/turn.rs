//! The per-turn protocol.
//!
//! 1. validate the player action (rejection logs a warning and stops)
//! 2. commit cooldown and mana, then resolve; a wiped opponent team wins
//! 3. opponent start-of-turn ticks; a burned-out opponent team wins
//! 4. opponent policy picks and resolves one action
//! 5. stunned opponents are reported
//! 6. player start-of-turn ticks
//! 7. end-of-turn cooldown, status and mana ticks for both teams
//! 8. lose check, then win check, else the next turn begins
//!
//! A pass replaces steps 1 and 2 when no player combatant can act.

use crate::combat::{ResolveError, RollingGuard, resolve_ability};
use crate::config::BattleConfig;
use crate::error::BattleError;
use crate::policy::BattleView;
use crate::state::{AbilityChoice, BattleEvent, Combatant, Outcome, Participant, Selection, Side};

use super::validation::{validate_action, validate_pass};
use super::{ActionError, BattleEngine, BattleEnv, PlayerAction, TurnError, TurnPhase, TurnReport};

impl BattleEngine<'_> {
    /// Runs one full turn for `action`.
    ///
    /// On [`TurnError::Invalid`] only a warning has been appended to the log.
    /// On [`TurnError::Internal`] the state is restored to what it was before
    /// the call.
    pub fn submit_player_action(
        &mut self,
        env: &mut BattleEnv<'_>,
        action: PlayerAction,
    ) -> Result<TurnReport, TurnError> {
        if let Err(reason) = self.validate(&action) {
            return Err(self.reject(reason));
        }
        self.atomically(|engine| {
            engine.enter(TurnPhase::Validating);
            engine.enter(TurnPhase::ResolvingPlayerAction);
            engine.perform(env, Side::Player, action.actor, action.ability, action.target)?;
            if engine.state.is_wiped(Side::Opponent) {
                engine.finish(Outcome::Win);
                return Ok(());
            }
            engine.respond(env)
        })
    }

    /// Runs a turn in which the player side does nothing.
    ///
    /// Only accepted while every living player combatant is stunned or has
    /// no ready, affordable ability; otherwise the battle could never move
    /// on. Rejections behave like [`Self::submit_player_action`]'s.
    pub fn pass_turn(&mut self, env: &mut BattleEnv<'_>) -> Result<TurnReport, TurnError> {
        if let Err(reason) = validate_pass(self.state, Side::Player) {
            return Err(self.reject(reason));
        }
        self.atomically(|engine| {
            engine.enter(TurnPhase::Validating);
            engine.report_stunned(Side::Player);
            engine.log(BattleEvent::NoAction { side: Side::Player });
            engine.respond(env)
        })
    }

    fn reject(&mut self, reason: ActionError) -> TurnError {
        let turn = self.state.turn;
        tracing::debug!(
            turn,
            code = reason.error_code(),
            severity = %reason.severity(),
            "player action rejected"
        );
        self.state.log.push(
            turn,
            BattleEvent::Rejected {
                reason: reason.clone(),
            },
        );
        TurnError::Invalid(reason)
    }

    /// Runs `turn`, rolling the state back if it fails part-way.
    fn atomically(
        &mut self,
        turn: impl FnOnce(&mut Self) -> Result<(), ResolveError>,
    ) -> Result<TurnReport, TurnError> {
        let checkpoint = self.state.checkpoint();
        let number = self.state.turn;
        let start = self.state.log.len();

        if let Err(error) = turn(self) {
            tracing::error!(turn = number, %error, "turn resolution failed, rolling back");
            self.state.restore(checkpoint);
            return Err(TurnError::Internal(error));
        }

        Ok(TurnReport {
            turn: number,
            events: self
                .state
                .log
                .since(start)
                .iter()
                .map(|entry| entry.event.clone())
                .collect(),
            outcome: self.state.outcome(),
        })
    }

    /// Everything after the player side's action: the opponent response,
    /// the shared ticks and the outcome checks.
    fn respond(&mut self, env: &mut BattleEnv<'_>) -> Result<(), ResolveError> {
        self.enter(TurnPhase::ResolvingOpponentAction);
        self.tick_start_of_turn(Side::Opponent);
        if self.state.is_wiped(Side::Opponent) {
            self.finish(Outcome::Win);
            return Ok(());
        }
        self.opponent_action(env)?;
        self.report_stunned(Side::Opponent);
        self.tick_start_of_turn(Side::Player);

        self.enter(TurnPhase::TickingEndOfTurn);
        self.tick_end_of_turn(env.config);

        self.enter(TurnPhase::CheckingOutcome);
        if self.state.is_wiped(Side::Player) {
            self.finish(Outcome::Lose);
        } else if self.state.is_wiped(Side::Opponent) {
            self.finish(Outcome::Win);
        } else {
            self.state.turn += 1;
            self.state.selection = Selection::default();
            self.enter(TurnPhase::AwaitingPlayerAction);
        }
        Ok(())
    }

    /// Commits cost and cooldown, then resolves one already-validated action.
    fn perform(
        &mut self,
        env: &mut BattleEnv<'_>,
        side: Side,
        actor: usize,
        choice: AbilityChoice,
        target: Option<usize>,
    ) -> Result<(), ResolveError> {
        let (acting, opposing) = self.state.teams_mut(side);
        let caster = acting
            .get_mut(actor)
            .ok_or(ResolveError::InvalidCaster { side, slot: actor })?;
        let ability = caster
            .ability(choice)
            .map(|slot| slot.definition.clone())
            .ok_or(ResolveError::UnknownAbility {
                side,
                slot: actor,
                ability: choice,
            })?;

        let cost = caster.effective_mana_cost(&ability);
        caster.spend_mana(cost)?;
        caster.commit_cooldown(choice);
        let used = BattleEvent::AbilityUsed {
            actor: Participant::new(side, actor, caster.name.clone()),
            ability: ability.name.clone(),
            ultimate: choice == AbilityChoice::Ultimate,
        };

        let mut guard = RollingGuard::new(&mut *env.rng);
        let events = resolve_ability(side, actor, &ability, acting, opposing, target, &mut guard)?;

        self.log(used);
        for event in events {
            self.log(event);
        }
        Ok(())
    }

    fn opponent_action(&mut self, env: &mut BattleEnv<'_>) -> Result<(), ResolveError> {
        if self.state.is_wiped(Side::Player)
            || !self.state.opponents.iter().any(Combatant::can_act)
        {
            return Ok(());
        }

        let view = BattleView::new(&self.state.opponents, &self.state.players);
        let Some(plan) = env.policy.choose(&view, &mut *env.rng) else {
            self.log(BattleEvent::NoAction {
                side: Side::Opponent,
            });
            return Ok(());
        };

        if let Err(reason) =
            validate_action(self.state, Side::Opponent, plan.actor, plan.ability, plan.target)
        {
            tracing::error!(?plan, %reason, "opponent policy proposed an invalid action");
            self.log(BattleEvent::NoAction {
                side: Side::Opponent,
            });
            return Ok(());
        }

        self.perform(env, Side::Opponent, plan.actor, plan.ability, plan.target)
    }

    /// Regen and burn for every living member of `side`.
    fn tick_start_of_turn(&mut self, side: Side) {
        let mut events = Vec::new();
        for (slot, combatant) in self.state.team_mut(side).iter_mut().enumerate() {
            let tick = combatant.tick_statuses_start_of_turn();
            let target = Participant::new(side, slot, combatant.name.clone());

            if tick.regen > 0 {
                events.push(BattleEvent::Regen {
                    target: target.clone(),
                    amount: tick.regen,
                });
            }
            let Some(burn) = tick.burn else {
                continue;
            };
            if burn.blocked {
                events.push(BattleEvent::BurnResisted { target });
                continue;
            }
            events.push(BattleEvent::BurnTick {
                target: target.clone(),
                amount: burn.lost,
            });
            if burn.defeated {
                events.push(BattleEvent::Defeated { target });
            }
        }
        for event in events {
            self.log(event);
        }
    }

    fn report_stunned(&mut self, side: Side) {
        let events: Vec<_> = self
            .state
            .team(side)
            .iter()
            .enumerate()
            .filter(|(_, combatant)| combatant.is_alive() && combatant.status.stunned > 0)
            .map(|(slot, combatant)| BattleEvent::CannotAct {
                target: Participant::new(side, slot, combatant.name.clone()),
                turns: combatant.status.stunned,
            })
            .collect();
        for event in events {
            self.log(event);
        }
    }

    fn tick_end_of_turn(&mut self, config: &BattleConfig) {
        for side in [Side::Player, Side::Opponent] {
            for combatant in self.state.team_mut(side).iter_mut() {
                let reduction = combatant.cooldown_reduction();
                combatant.tick_cooldowns_end_of_turn(reduction);
                combatant.restore_mana(config.mana_regen_per_turn);
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        let (event, phase) = match outcome {
            Outcome::Lose => (BattleEvent::Defeat, TurnPhase::Lost),
            _ => (BattleEvent::Victory, TurnPhase::Won),
        };
        self.log(event);
        self.enter(phase);
        tracing::info!(turn = self.state.turn, %outcome, "battle finished");
    }

    fn log(&mut self, event: BattleEvent) {
        let turn = self.state.turn;
        self.state.log.push(turn, event);
    }
}
