//! Effect definitions.
//!
//! Spell cards are stored with a `"type:value"` effect string. The string
//! is parsed once at card import into an `Effect`, so resolution never
//! re-parses text.

use serde::{Deserialize, Serialize};

/// Largest magnitude an effect string can carry. Larger values are clamped
/// so every magnitude fits the signed hp and attack arithmetic.
pub const MAX_MAGNITUDE: u32 = i32::MAX as u32;

/// A spell effect with its magnitude.
///
/// ```
/// use ccg_arena::effects::Effect;
///
/// assert_eq!(Effect::parse("damage:200"), Effect::Damage(200));
/// assert_eq!(Effect::parse("combo_boost:50"), Effect::ComboBoost(50));
/// assert_eq!(Effect::parse(""), Effect::None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// No effect. Resolving it only logs "No effect".
    #[default]
    None,

    /// Damage the opposing side's hp.
    Damage(u32),

    /// Heal the caster's hp, up to the cap.
    Heal(u32),

    /// Add attack to every monster on the caster's field.
    Boost(u32),

    /// Logged only; no mechanical mitigation.
    Shield(u32),

    /// Stun every monster on the opposing field for this many turns.
    Stun(u32),

    /// Set the opposing side's poison duration.
    Poison(u32),

    /// Attack bonus per card already played this turn, given to the
    /// most recently placed friendly monster.
    ComboBoost(u32),

    /// An effect with no built-in meaning, resolved through the
    /// `EffectRegistry`.
    Custom { name: String, value: u32 },
}

impl Effect {
    /// Parse a `"type:value"` effect string.
    ///
    /// A missing or malformed value parses as 0 and values above
    /// `MAX_MAGNITUDE` are clamped to it. An empty type is `None`;
    /// any unrecognized type becomes `Custom`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (name, value) = match raw.split_once(':') {
            Some((name, value)) => (name.trim(), value.trim().parse::<u32>().map_or(0, |v| v.min(MAX_MAGNITUDE))),
            None => (raw, 0),
        };

        match name.to_ascii_lowercase().as_str() {
            "" => Effect::None,
            "damage" => Effect::Damage(value),
            "heal" => Effect::Heal(value),
            "boost" => Effect::Boost(value),
            "shield" => Effect::Shield(value),
            "stun" => Effect::Stun(value),
            "poison" => Effect::Poison(value),
            "combo_boost" => Effect::ComboBoost(value),
            other => Effect::Custom {
                name: other.to_string(),
                value,
            },
        }
    }

    /// Effect name as used in stored strings and registry keys.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Effect::None => "none",
            Effect::Damage(_) => "damage",
            Effect::Heal(_) => "heal",
            Effect::Boost(_) => "boost",
            Effect::Shield(_) => "shield",
            Effect::Stun(_) => "stun",
            Effect::Poison(_) => "poison",
            Effect::ComboBoost(_) => "combo_boost",
            Effect::Custom { name, .. } => name,
        }
    }

    /// Effect magnitude.
    #[must_use]
    pub fn value(&self) -> u32 {
        match self {
            Effect::None => 0,
            Effect::Damage(v)
            | Effect::Heal(v)
            | Effect::Boost(v)
            | Effect::Shield(v)
            | Effect::Stun(v)
            | Effect::Poison(v)
            | Effect::ComboBoost(v) => *v,
            Effect::Custom { value, .. } => *value,
        }
    }

    /// The target a spell with this effect aims at when none is requested.
    #[must_use]
    pub fn natural_target(&self) -> SpellTarget {
        match self {
            Effect::Damage(_) | Effect::Stun(_) | Effect::Poison(_) => SpellTarget::Opponent,
            _ => SpellTarget::Own,
        }
    }
}

/// Requested target of a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellTarget {
    #[serde(rename = "opponent")]
    Opponent,
    #[serde(rename = "self")]
    Own,
}

impl SpellTarget {
    /// Parse a stored target string; anything but `"self"` aims at the opponent.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("self") {
            SpellTarget::Own
        } else {
            SpellTarget::Opponent
        }
    }
}
