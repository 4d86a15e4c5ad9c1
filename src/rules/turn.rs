//! End-of-turn state machine.
//!
//! ## Solo
//!
//! One `end_turn` call runs a whole round: the player's status tick and
//! attack phase, the AI's turn and attack phase, then the shared refresh
//! (mana growth, overload, draw, stun decay) and outcome detection. The AI
//! half is skipped entirely when the match is already decided after the
//! player's attack.
//!
//! ## Versus
//!
//! `end_turn` resolves the acting side's tick and attack phase and hands
//! the turn over. The other side's actions arrive through its own calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::OpponentPolicy;
use crate::cards::StatusFlags;
use crate::combat::{BattleEvent, BattleReport, CombatResolver};
use crate::core::{EngineError, EngineResult, MatchMode, MatchState, Side, SIDE_POISON};
use crate::effects::EffectResolver;

use super::outcome::MatchOutcome;

/// Everything an `end_turn` call produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndTurnReport {
    pub battle_log: Vec<String>,
    pub battle_events: Vec<BattleEvent>,

    /// Cards the AI played, in order. Empty in versus matches.
    pub opponent_actions: Vec<String>,

    pub winner: Option<MatchOutcome>,
}

impl EndTurnReport {
    fn absorb(&mut self, report: BattleReport) {
        self.battle_log.extend(report.log);
        self.battle_events.extend(report.events);
    }
}

/// Drives turn transitions.
pub struct TurnController<'a> {
    resolver: EffectResolver<'a>,
    policy: &'a dyn OpponentPolicy,
}

impl<'a> TurnController<'a> {
    #[must_use]
    pub fn new(resolver: EffectResolver<'a>, policy: &'a dyn OpponentPolicy) -> Self {
        Self { resolver, policy }
    }

    /// End `actor`'s turn.
    pub fn end_turn(&self, state: &mut MatchState, actor: Side) -> EngineResult<EndTurnReport> {
        if state.outcome.is_some() {
            return Err(EngineError::NoActiveMatch);
        }
        if state.turn != actor {
            return Err(EngineError::NotYourTurn);
        }
        state.side_mut(actor).mulligan_used = true;

        let report = match state.mode {
            MatchMode::Solo { .. } => self.end_solo_round(state, actor),
            MatchMode::Versus => Self::hand_over(state, actor),
        };

        if let Some(outcome) = report.winner {
            info!(
                winner = outcome.label(state.mode),
                turn = state.turn_count,
                "match finished"
            );
        }
        Ok(report)
    }

    fn end_solo_round(&self, state: &mut MatchState, actor: Side) -> EndTurnReport {
        let opponent = actor.opponent();
        let mut report = EndTurnReport::default();

        report.absorb(tick_statuses(state, actor));
        report.absorb(CombatResolver::resolve_attack_phase(state, actor));

        if !state.is_over() {
            state.turn = opponent;
            state.cards_played_this_turn = 0;
            if let Some(card) = state.draw(opponent) {
                debug!(side = %opponent, card = %card, "opponent draws");
            }
            report.opponent_actions = self.policy.take_turn(state, opponent, &self.resolver);
            report.absorb(tick_statuses(state, opponent));

            if !state.side(opponent).is_defeated() {
                report.absorb(CombatResolver::resolve_attack_phase(state, opponent));
            }
        }

        state.turn = actor;
        state.turn_count += 1;
        state.cards_played_this_turn = 0;

        for side in Side::BOTH {
            refresh_mana(state, side);
        }
        state.draw(actor);
        for side in Side::BOTH {
            decay_stuns(state, side);
        }

        state.outcome = MatchOutcome::detect(state);
        report.winner = state.outcome;
        report
    }

    fn hand_over(state: &mut MatchState, actor: Side) -> EndTurnReport {
        let next = actor.opponent();
        let mut report = EndTurnReport::default();

        report.absorb(tick_statuses(state, actor));
        report.absorb(CombatResolver::resolve_attack_phase(state, actor));

        state.turn = next;
        state.cards_played_this_turn = 0;
        if next == Side::First {
            state.turn_count += 1;
        }
        refresh_mana(state, next);
        state.draw(next);
        decay_stuns(state, actor);

        state.outcome = MatchOutcome::detect(state);
        report.winner = state.outcome;
        report
    }
}

/// Apply one status tick to `side`.
///
/// Side poison drains hp and counts down; other side-level effects only
/// count down. Poisoned monsters take their tick damage and the dead are
/// swept.
pub fn tick_statuses(state: &mut MatchState, side: Side) -> BattleReport {
    let mut report = BattleReport::new();
    let label = state.label(side);
    let drain = state.config.side_poison_damage;
    let target = state.side_mut(side);

    if target.status_turns(SIDE_POISON) > 0 {
        target.hp -= drain;
        report.line(format!("{} takes {} poison damage", label, drain));
        report.event(BattleEvent::damage(SIDE_POISON, label, side, None, drain));
    }
    target.status_effects.retain(|_, turns| {
        *turns = turns.saturating_sub(1);
        *turns > 0
    });

    for (index, monster) in target.field.iter_mut().enumerate() {
        if monster.has_status(StatusFlags::POISONED) {
            monster.take_damage(monster.poison_damage);
            report.line(format!("{} takes {} poison damage", monster.name, monster.poison_damage));
            report.event(BattleEvent::damage(
                SIDE_POISON,
                &monster.name,
                side,
                Some(index),
                monster.poison_damage,
            ));
        }
    }

    CombatResolver::sweep_destroyed(state, side, &mut report);
    report
}

/// Grow `max_mana` by one (capped) and refill, paying off overload.
fn refresh_mana(state: &mut MatchState, side: Side) {
    let cap = state.config.max_mana;
    let s = state.side_mut(side);
    s.max_mana = (s.max_mana + 1).min(cap);
    s.mana = s.max_mana.saturating_sub(s.overload);
    s.overload = 0;
}

fn decay_stuns(state: &mut MatchState, side: Side) {
    for monster in &mut state.side_mut(side).field {
        monster.decay_stun();
    }
}
