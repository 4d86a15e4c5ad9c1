//! Match configuration.
//!
//! `MatchConfig` carries the numeric rules of a match: hit point and mana
//! caps, hand limits, mulligan size and poison tick damage. The config is
//! stored inside `MatchState`, so a match restored from storage keeps the
//! rules it was started with.

use serde::{Deserialize, Serialize};

/// Numeric rules for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Hit point cap. Healing never raises hp above this.
    pub max_hp: i32,

    /// Hit points each side starts with.
    pub starting_hp: i32,

    /// Cap for `max_mana`.
    pub max_mana: u32,

    /// `mana` and `max_mana` on turn 1.
    pub starting_mana: u32,

    /// No card is drawn while a hand holds this many cards.
    pub hand_limit: usize,

    /// Cards drawn into each opening hand.
    pub starting_hand_size: usize,

    /// Maximum number of cards a single mulligan may replace.
    pub mulligan_limit: usize,

    /// Damage per tick dealt to a monster poisoned by the `poison` keyword.
    pub poison_keyword_damage: i32,

    /// Damage per tick dealt to a side under the `poison` spell effect.
    pub side_poison_damage: i32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_hp: 2000,
            starting_hp: 2000,
            max_mana: 10,
            starting_mana: 1,
            hand_limit: 10,
            starting_hand_size: 4,
            mulligan_limit: 3,
            poison_keyword_damage: 50,
            side_poison_damage: 50,
        }
    }
}

impl MatchConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hp cap and starting hp together.
    #[must_use]
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.max_hp = hp;
        self.starting_hp = hp;
        self
    }

    /// Set the mana cap.
    #[must_use]
    pub fn with_max_mana(mut self, max_mana: u32) -> Self {
        self.max_mana = max_mana;
        self
    }

    /// Set the starting mana.
    #[must_use]
    pub fn with_starting_mana(mut self, mana: u32) -> Self {
        self.starting_mana = mana.min(self.max_mana);
        self
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set both poison tick amounts.
    #[must_use]
    pub fn with_poison_damage(mut self, keyword: i32, side: i32) -> Self {
        self.poison_keyword_damage = keyword;
        self.side_poison_damage = side;
        self
    }
}
