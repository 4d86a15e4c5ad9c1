//! Hand actions: playing a card and the opening mulligan.
//!
//! Both operations validate every precondition before touching the state,
//! so an `Err` leaves the match exactly as it was.

use tracing::debug;

use crate::core::{EngineError, EngineResult, MatchState, Side};
use crate::effects::{EffectResolver, SpellTarget};

/// A request to play one card from hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayRequest {
    pub hand_index: usize,

    /// Spell target. Falls back to the card's own target.
    pub target: Option<SpellTarget>,

    /// "Choose one" variant for monsters.
    pub choice: Option<usize>,
}

impl PlayRequest {
    /// Play the card at `hand_index` with default target and no choice.
    #[must_use]
    pub fn new(hand_index: usize) -> Self {
        Self {
            hand_index,
            ..Self::default()
        }
    }

    /// Set the spell target (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: SpellTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the "choose one" variant (builder pattern).
    #[must_use]
    pub fn with_choice(mut self, choice: usize) -> Self {
        self.choice = Some(choice);
        self
    }
}

/// Play a card from `actor`'s hand.
///
/// Monsters go to the end of the field; spells resolve immediately.
/// Returns the log line for the play.
pub fn play_card(
    state: &mut MatchState,
    resolver: &EffectResolver<'_>,
    actor: Side,
    request: PlayRequest,
) -> EngineResult<String> {
    if state.outcome.is_some() {
        return Err(EngineError::NoActiveMatch);
    }
    if state.turn != actor {
        return Err(EngineError::NotYourTurn);
    }

    let side = state.side(actor);
    let card = side.hand.get(request.hand_index).ok_or(EngineError::InvalidCardIndex {
        index: request.hand_index,
        hand_size: side.hand.len(),
    })?;
    if side.mana < card.mana_cost {
        return Err(EngineError::InsufficientMana {
            cost: card.mana_cost,
            available: side.mana,
        });
    }

    let label = state.label(actor);
    let side = state.side_mut(actor);
    let mut card = side.hand.remove(request.hand_index);
    side.mana -= card.mana_cost;
    side.overload += card.overload;
    side.mulligan_used = true;

    let message = if card.is_monster() {
        if let Some(choice) = request.choice {
            card.apply_choice(choice);
        }
        card.prepare_for_field();
        let message = format!("{} plays {}", label, card.label());
        side.field.push(card);
        message
    } else {
        let target = request.target.unwrap_or(card.target);
        let effect = resolver.apply(state, &card, actor, target);
        format!("{} casts {}: {}", label, card.name, effect)
    };

    state.cards_played_this_turn += 1;
    debug!(side = %actor, cards_played = state.cards_played_this_turn, "{}", message);
    Ok(message)
}

/// Replace up to `config.mulligan_limit` opening cards.
///
/// Replacements are drawn from the top of the pool; the returned cards go
/// to the bottom afterwards. Usable once per side, before any other action.
pub fn mulligan(state: &mut MatchState, actor: Side, indices: &[usize]) -> EngineResult<Vec<String>> {
    if state.outcome.is_some() {
        return Err(EngineError::NoActiveMatch);
    }
    let limit = state.config.mulligan_limit;
    let side = state.side(actor);

    if side.mulligan_used {
        return Err(EngineError::MulliganAlreadyUsed);
    }
    if indices.len() > limit {
        return Err(EngineError::MulliganTooManyCards {
            requested: indices.len(),
            limit,
        });
    }

    let mut indices = indices.to_vec();
    indices.sort_unstable();
    indices.dedup();
    if let Some(&index) = indices.iter().find(|&&i| i >= side.hand.len()) {
        return Err(EngineError::InvalidCardIndex {
            index,
            hand_size: side.hand.len(),
        });
    }

    let side = state.side_mut(actor);
    side.mulligan_used = true;

    let mut returned = Vec::with_capacity(indices.len());
    for &index in indices.iter().rev() {
        returned.push(side.hand.remove(index));
    }

    let mut drawn = Vec::with_capacity(returned.len());
    for _ in 0..returned.len() {
        match side.draw_pool.pop() {
            Some(card) => {
                drawn.push(card.name.clone());
                side.hand.push(card);
            }
            None => break,
        }
    }

    for card in returned {
        side.draw_pool.insert(0, card);
    }

    debug!(side = %actor, replaced = drawn.len(), "mulligan");
    Ok(drawn)
}
