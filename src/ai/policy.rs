//! Opponent policies.
//!
//! - `OpponentPolicy`: how the non-human side spends its turn
//! - `ScriptedAi`: greedy, difficulty-scaled card scoring

use smallvec::SmallVec;
use tracing::debug;

use crate::cards::CardUid;
use crate::core::{MatchState, Side};
use crate::effects::{Effect, EffectResolver};
use crate::rules::{play_card, PlayRequest};

use super::difficulty::DifficultyProfile;
use super::scoring::{score, HEAL_THRESHOLD};

/// Level used when a match carries no AI level.
pub const DEFAULT_AI_LEVEL: u8 = 3;

/// Plays a turn for a non-human side.
pub trait OpponentPolicy: Send + Sync {
    /// Play `side`'s cards. Returns one log line per card played.
    ///
    /// Called with `state.turn == side`. The attack phase is not part of
    /// the policy.
    fn take_turn(&self, state: &mut MatchState, side: Side, resolver: &EffectResolver<'_>) -> Vec<String>;
}

/// A scored hand card.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    uid: CardUid,
    score: f64,
}

/// Scripted opponent: score, randomize, rank, play greedily.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptedAi;

impl ScriptedAi {
    /// Ranked candidates for `side`, best first.
    fn rank(state: &mut MatchState, side: Side, profile: &DifficultyProfile) -> SmallVec<[Candidate; 8]> {
        let hand = &state.side(side).hand;
        let pool = profile.candidate_pool.unwrap_or(hand.len()).min(hand.len());

        let raw: SmallVec<[Candidate; 8]> = hand[..pool]
            .iter()
            .map(|card| Candidate {
                uid: card.uid,
                score: score(card, state, side, profile),
            })
            .collect();

        let mut ranked: SmallVec<[Candidate; 8]> = raw
            .into_iter()
            .map(|c| Candidate {
                score: profile.randomize(c.score, &mut state.rng),
                ..c
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Spells that only make sense in the right situation.
    fn spell_is_sensible(effect: &Effect, state: &MatchState, side: Side) -> bool {
        let own = state.side(side);
        match effect {
            Effect::Heal(_) => own.hp_fraction(state.config.max_hp) < HEAL_THRESHOLD,
            Effect::Boost(_) | Effect::ComboBoost(_) => !own.field.is_empty(),
            _ => true,
        }
    }
}

impl OpponentPolicy for ScriptedAi {
    fn take_turn(&self, state: &mut MatchState, side: Side, resolver: &EffectResolver<'_>) -> Vec<String> {
        let profile = DifficultyProfile::for_level(state.ai_level().unwrap_or(DEFAULT_AI_LEVEL));
        let ranked = Self::rank(state, side, &profile);
        let mut actions = Vec::new();

        for candidate in ranked {
            if profile.play_cap.is_some_and(|cap| actions.len() >= cap) {
                break;
            }
            let mana = state.side(side).mana;
            if mana == 0 {
                break;
            }

            let Some(index) = state.side(side).hand_position(candidate.uid) else {
                continue;
            };
            let card = &state.side(side).hand[index];
            if card.mana_cost > mana {
                continue;
            }
            if card.is_spell() && !Self::spell_is_sensible(&card.effect, state, side) {
                debug!(card = %card.name, "ai holds spell");
                continue;
            }

            match play_card(state, resolver, side, PlayRequest::new(index)) {
                Ok(message) => actions.push(message),
                Err(err) => debug!(error = %err, "ai play rejected"),
            }
        }

        debug!(side = %side, level = profile.level, plays = actions.len(), "ai turn done");
        actions
    }
}
