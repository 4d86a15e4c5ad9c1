//! Card scoring for the scripted opponent. Higher is better.

use crate::cards::{CardInstance, Keywords};
use crate::core::{MatchState, Side};
use crate::effects::Effect;

use super::difficulty::DifficultyProfile;

/// Opponent hp fraction below which damage spells get the finishing bonus.
const FINISH_THRESHOLD: f64 = 0.3;

/// Own hp fraction below which healing is worth casting.
pub const HEAL_THRESHOLD: f64 = 0.6;

/// Own hp fraction below which lifesteal is valued.
const LIFESTEAL_THRESHOLD: f64 = 0.7;

/// Score `card` for `side` before randomization.
#[must_use]
pub fn score(card: &CardInstance, state: &MatchState, side: Side, profile: &DifficultyProfile) -> f64 {
    let base = if card.is_monster() {
        score_monster(card, state, side, profile)
    } else {
        score_spell(card, state, side, profile)
    };
    base + (10.0 - f64::from(card.mana_cost)) * profile.mana_efficiency
}

fn score_monster(card: &CardInstance, state: &MatchState, side: Side, profile: &DifficultyProfile) -> f64 {
    let max_hp = state.config.max_hp;
    let own = state.side(side);
    let foe = state.side(side.opponent());

    let cost = f64::from(card.mana_cost.max(1));
    let mut score = (f64::from(card.attack) + f64::from(card.defense)) / cost * 10.0;

    let mut bonus = 0.0;
    if card.has_keyword(Keywords::TAUNT) && foe.field_power() > 0 {
        bonus += 30.0;
    }
    if card.has_keyword(Keywords::DIVINE_SHIELD) {
        bonus += 40.0;
    }
    if card.has_keyword(Keywords::LIFESTEAL) && own.hp_fraction(max_hp) < LIFESTEAL_THRESHOLD {
        bonus += 25.0;
    }
    if card.keywords.intersects(Keywords::CHARGE | Keywords::RUSH) {
        bonus += 20.0;
    }
    if card.has_keyword(Keywords::WINDFURY) {
        bonus += 30.0;
    }
    score += bonus * profile.keyword_multiplier;

    if own.field.len() < foe.field.len() {
        score += profile.board_presence_bonus();
    }
    score + f64::from(card.attack) * profile.aggression()
}

fn score_spell(card: &CardInstance, state: &MatchState, side: Side, profile: &DifficultyProfile) -> f64 {
    let max_hp = state.config.max_hp;
    let own = state.side(side);
    let foe = state.side(side.opponent());

    match card.effect {
        Effect::Damage(value) => {
            let mut score = f64::from(value) * profile.damage_multiplier;
            if foe.hp_fraction(max_hp) < FINISH_THRESHOLD {
                score += profile.finish_bonus;
            }
            score - profile.early_damage_penalty(state.turn_count)
        }
        Effect::Heal(value) => {
            if profile.overvalues_healing() {
                f64::from(value) * 1.5
            } else if own.hp_fraction(max_hp) < HEAL_THRESHOLD {
                f64::from(value) * profile.damage_multiplier
            } else {
                -50.0
            }
        }
        Effect::Boost(value) => {
            if own.field.is_empty() {
                -100.0
            } else {
                f64::from(value) * own.field.len() as f64 * profile.damage_multiplier / 2.0
            }
        }
        Effect::ComboBoost(value) => {
            if own.field.is_empty() {
                -100.0
            } else {
                let combo = f64::from(state.cards_played_this_turn + 1);
                f64::from(value) * combo * profile.damage_multiplier / 2.0
            }
        }
        Effect::Stun(turns) => 40.0 * foe.field.len() as f64 * profile.keyword_multiplier * f64::from(turns),
        Effect::Poison(turns) => f64::from(turns) * 10.0 * profile.keyword_multiplier,
        Effect::Shield(_) => 10.0,
        Effect::None | Effect::Custom { .. } => 0.0,
    }
}
