//! Client-safe projections of a match.
//!
//! A `ClientView` is built for one side. It shows that side's hand in full
//! and reduces the opponent's hand and both draw pools to counts. Hit
//! points are clamped at 0.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cards::{CardInstance, CardKind, StatusFlags};
use crate::core::{MatchState, Side, SideState};

/// A visible card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub uid: u32,
    pub name: String,
    pub kind: CardKind,
    pub mana_cost: u32,
    pub attack: i32,

    /// Stat line shown in hand: explicit health, else defense.
    pub defense: i32,

    /// Only for monsters on a field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_health: Option<i32>,

    pub overload: u32,
    pub keywords: Vec<&'static str>,
    pub stunned: bool,
    pub poisoned: bool,

    /// Stored effect string for spells, e.g. `damage:300`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,

    pub choices: Vec<String>,
}

impl CardView {
    #[must_use]
    pub fn of(card: &CardInstance) -> Self {
        Self {
            uid: card.uid.0,
            name: card.name.clone(),
            kind: card.kind,
            mana_cost: card.mana_cost,
            attack: card.attack,
            defense: card.health.unwrap_or(card.defense),
            health: card.current_health.map(|hp| hp.max(0)),
            max_health: card.max_health,
            overload: card.overload,
            keywords: card.keywords.names(),
            stunned: card.has_status(StatusFlags::STUNNED),
            poisoned: card.has_status(StatusFlags::POISONED),
            effect: card
                .is_spell()
                .then(|| format!("{}:{}", card.effect.name(), card.effect.value())),
            choices: card.choices.iter().map(|c| c.name.clone()).collect(),
        }
    }
}

fn cards(cards: &[CardInstance]) -> Vec<CardView> {
    cards.iter().map(CardView::of).collect()
}

fn statuses(side: &SideState) -> BTreeMap<String, u32> {
    side.status_effects.iter().map(|(k, v)| (k.clone(), *v)).collect()
}

/// The requesting side, in full.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OwnView {
    pub label: &'static str,
    pub hp: i32,
    pub mana: u32,
    pub max_mana: u32,
    pub overload: u32,
    pub hand: Vec<CardView>,
    pub field: Vec<CardView>,
    pub draw_pool_count: usize,
    pub status_effects: BTreeMap<String, u32>,
    pub mulligan_available: bool,
}

/// The other side, with hidden zones reduced to counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OpponentView {
    pub label: &'static str,
    pub hp: i32,
    pub mana: u32,
    pub max_mana: u32,
    pub hand_count: usize,
    pub field: Vec<CardView>,
    pub draw_pool_count: usize,
    pub status_effects: BTreeMap<String, u32>,
}

/// What one side's client may see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClientView {
    pub you: OwnView,
    pub opponent: OpponentView,

    /// Label of the side to act.
    pub turn: &'static str,
    pub your_turn: bool,
    pub turn_count: u32,

    /// Winner label or "draw" once the match is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<&'static str>,
}

impl ClientView {
    /// Project `state` for `viewer`.
    #[must_use]
    pub fn new(state: &MatchState, viewer: Side) -> Self {
        let own = state.side(viewer);
        let foe_side = viewer.opponent();
        let foe = state.side(foe_side);

        Self {
            you: OwnView {
                label: state.label(viewer),
                hp: own.display_hp(),
                mana: own.mana,
                max_mana: own.max_mana,
                overload: own.overload,
                hand: cards(&own.hand),
                field: cards(&own.field),
                draw_pool_count: own.draw_pool.len(),
                status_effects: statuses(own),
                mulligan_available: !own.mulligan_used,
            },
            opponent: OpponentView {
                label: state.label(foe_side),
                hp: foe.display_hp(),
                mana: foe.mana,
                max_mana: foe.max_mana,
                hand_count: foe.hand.len(),
                field: cards(&foe.field),
                draw_pool_count: foe.draw_pool.len(),
                status_effects: statuses(foe),
            },
            turn: state.label(state.turn),
            your_turn: state.turn == viewer,
            turn_count: state.turn_count,
            winner: state.outcome.map(|o| o.label(state.mode)),
        }
    }
}
