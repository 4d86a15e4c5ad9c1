//! Match state: the authoritative snapshot of one match.
//!
//! ## SideState
//!
//! Everything one participant owns:
//! - hp, mana, max mana, pending overload
//! - hand, field (attack-priority order), draw pool (top = end of vec)
//! - side-level status effects keyed by effect name (remaining turns)
//!
//! ## MatchState
//!
//! Both sides plus the global turn bookkeeping, the match config and the
//! match RNG. The whole value round-trips through `bincode` for storage.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::MatchConfig;
use super::error::EngineResult;
use super::rng::GameRng;
use super::side::{Side, SideMap};
use crate::cards::{CardInstance, CardUid};
use crate::rules::MatchOutcome;

/// Status effect key for side-level poison.
pub const SIDE_POISON: &str = "poison";

/// Single-player against the AI, or two humans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// `Side::First` is the player, `Side::Second` the AI.
    Solo { ai_level: u8 },
    /// `player1` against `player2`.
    Versus,
}

impl MatchMode {
    /// Label a side for logs and client payloads.
    #[must_use]
    pub fn label(self, side: Side) -> &'static str {
        match (self, side) {
            (MatchMode::Solo { .. }, Side::First) => "player",
            (MatchMode::Solo { .. }, Side::Second) => "ai",
            (MatchMode::Versus, Side::First) => "player1",
            (MatchMode::Versus, Side::Second) => "player2",
        }
    }
}

/// One participant's share of the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideState {
    /// Raw hp. May dip below 0 inside a resolution step.
    pub hp: i32,
    pub mana: u32,
    pub max_mana: u32,

    /// Mana owed at the next refresh.
    pub overload: u32,

    pub hand: Vec<CardInstance>,

    /// Index 0 is the default attack target.
    pub field: Vec<CardInstance>,

    /// Shuffled once at match start. Draws pop from the end.
    pub draw_pool: Vec<CardInstance>,

    /// Effect name -> remaining turns.
    pub status_effects: FxHashMap<String, u32>,

    pub mulligan_used: bool,
}

impl SideState {
    /// Fresh side at match start, before any cards are dealt.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            hp: config.starting_hp,
            mana: config.starting_mana,
            max_mana: config.starting_mana,
            overload: 0,
            hand: Vec::new(),
            field: Vec::new(),
            draw_pool: Vec::new(),
            status_effects: FxHashMap::default(),
            mulligan_used: false,
        }
    }

    /// hp as shown to clients.
    #[must_use]
    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// hp as a fraction of the cap.
    #[must_use]
    pub fn hp_fraction(&self, max_hp: i32) -> f64 {
        f64::from(self.hp) / f64::from(max_hp.max(1))
    }

    /// Sum of attack on the field.
    #[must_use]
    pub fn field_power(&self) -> i32 {
        self.field.iter().fold(0i32, |total, m| total.saturating_add(m.attack))
    }

    /// Heal up to the hp cap. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32, max_hp: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(max_hp).max(before);
        self.hp - before
    }

    /// Move the top card of the draw pool into the hand.
    ///
    /// Returns `None` when the pool is empty or the hand is at `hand_limit`.
    pub fn draw(&mut self, hand_limit: usize) -> Option<&CardInstance> {
        if self.hand.len() >= hand_limit {
            return None;
        }
        let card = self.draw_pool.pop()?;
        self.hand.push(card);
        self.hand.last()
    }

    /// Remaining turns of a side-level status effect.
    #[must_use]
    pub fn status_turns(&self, name: &str) -> u32 {
        self.status_effects.get(name).copied().unwrap_or(0)
    }

    /// Find a hand card by uid.
    #[must_use]
    pub fn hand_position(&self, uid: CardUid) -> Option<usize> {
        self.hand.iter().position(|c| c.uid == uid)
    }
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub config: MatchConfig,
    pub mode: MatchMode,
    pub sides: SideMap<SideState>,

    /// Side whose turn it is.
    pub turn: Side,

    /// Starts at 1.
    pub turn_count: u32,

    pub cards_played_this_turn: u32,

    /// Set once a terminal outcome is detected.
    pub outcome: Option<MatchOutcome>,

    /// Sides that have been shown the outcome.
    pub outcome_seen: SideMap<bool>,

    pub rng: GameRng,

    next_uid: u32,
}

impl MatchState {
    /// Create a match: assign uids, shuffle both pools, deal opening hands.
    #[must_use]
    pub fn new(config: MatchConfig, mode: MatchMode, pools: SideMap<Vec<CardInstance>>, seed: u64) -> Self {
        let sides = SideMap::new(|_| SideState::new(&config));
        let mut state = Self {
            config,
            mode,
            sides,
            turn: Side::First,
            turn_count: 1,
            cards_played_this_turn: 0,
            outcome: None,
            outcome_seen: SideMap::with_value(false),
            rng: GameRng::new(seed),
            next_uid: 1,
        };

        let (first, second) = pools.into_pair();
        for (side, pool) in [(Side::First, first), (Side::Second, second)] {
            let mut pool: Vec<CardInstance> = pool
                .into_iter()
                .map(|mut card| {
                    card.uid = state.alloc_uid();
                    card
                })
                .collect();
            state.rng.shuffle(&mut pool);
            state.sides[side].draw_pool = pool;
        }

        for side in Side::BOTH {
            for _ in 0..state.config.starting_hand_size {
                state.draw(side);
            }
        }

        state
    }

    /// Allocate a match-unique card uid.
    pub fn alloc_uid(&mut self) -> CardUid {
        let uid = CardUid(self.next_uid);
        self.next_uid += 1;
        uid
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side]
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side]
    }

    /// Label of a side ("player", "ai", "player1", "player2").
    #[must_use]
    pub fn label(&self, side: Side) -> &'static str {
        self.mode.label(side)
    }

    /// AI difficulty in single-player matches.
    #[must_use]
    pub fn ai_level(&self) -> Option<u8> {
        match self.mode {
            MatchMode::Solo { ai_level } => Some(ai_level),
            MatchMode::Versus => None,
        }
    }

    /// Record that `side` has been shown the outcome.
    ///
    /// Returns true once every human side has seen it. The AI side of a
    /// solo match never needs to.
    pub fn acknowledge_outcome(&mut self, side: Side) -> bool {
        self.outcome_seen[side] = true;
        match self.mode {
            MatchMode::Solo { .. } => self.outcome_seen[Side::First],
            MatchMode::Versus => self.outcome_seen.iter().all(|(_, seen)| *seen),
        }
    }

    /// Draw one card for a side if its hand is below the limit.
    ///
    /// Returns the drawn card's name.
    pub fn draw(&mut self, side: Side) -> Option<String> {
        let limit = self.config.hand_limit;
        self.sides[side].draw(limit).map(|card| card.name.clone())
    }

    /// True once either side is at or below 0 hp.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.sides.iter().any(|(_, s)| s.is_defeated())
    }

    /// Encode for storage.
    pub fn to_bytes(&self) -> EngineResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from storage.
    pub fn from_bytes(bytes: &[u8]) -> EngineResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
