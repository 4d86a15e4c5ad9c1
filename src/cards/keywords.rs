//! Keyword and status sets.
//!
//! Keywords are fixed at card import: the stored comma-separated list is
//! parsed once into a `Keywords` bitset and unrecognized tokens are dropped.
//! `StatusFlags` are the timed combat tags the engine attaches while a
//! monster is on the field.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Combat keywords a monster can carry.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Keywords: u16 {
        const TAUNT = 1 << 0;
        const DIVINE_SHIELD = 1 << 1;
        const STEALTH = 1 << 2;
        const WINDFURY = 1 << 3;
        const LIFESTEAL = 1 << 4;
        const POISON = 1 << 5;
        const CHARGE = 1 << 6;
        const RUSH = 1 << 7;
    }
}

impl Keywords {
    /// Map one keyword token to its flag.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let flag = match token.trim().to_ascii_lowercase().as_str() {
            "taunt" => Self::TAUNT,
            "divine_shield" => Self::DIVINE_SHIELD,
            "stealth" => Self::STEALTH,
            "windfury" => Self::WINDFURY,
            "lifesteal" => Self::LIFESTEAL,
            "poison" => Self::POISON,
            "charge" => Self::CHARGE,
            "rush" => Self::RUSH,
            _ => return None,
        };
        Some(flag)
    }

    /// Parse a comma-separated keyword list, dropping unknown tokens.
    ///
    /// ```
    /// use ccg_arena::cards::Keywords;
    ///
    /// let kw = Keywords::parse_list("taunt, Lifesteal,flying");
    /// assert_eq!(kw, Keywords::TAUNT | Keywords::LIFESTEAL);
    /// ```
    #[must_use]
    pub fn parse_list(list: &str) -> Self {
        list.split(',')
            .filter_map(Self::from_token)
            .fold(Self::empty(), |acc, flag| acc | flag)
    }

    /// Stored token names, in flag order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        const TOKENS: [(Keywords, &str); 8] = [
            (Keywords::TAUNT, "taunt"),
            (Keywords::DIVINE_SHIELD, "divine_shield"),
            (Keywords::STEALTH, "stealth"),
            (Keywords::WINDFURY, "windfury"),
            (Keywords::LIFESTEAL, "lifesteal"),
            (Keywords::POISON, "poison"),
            (Keywords::CHARGE, "charge"),
            (Keywords::RUSH, "rush"),
        ];
        TOKENS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|&(_, token)| token)
            .collect()
    }
}

bitflags! {
    /// Timed status tags on a monster in play.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct StatusFlags: u8 {
        const STUNNED = 1 << 0;
        const POISONED = 1 << 1;
        const FROZEN = 1 << 2;
    }
}
