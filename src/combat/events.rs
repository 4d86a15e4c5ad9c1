//! Structured battle events for client animation.
//!
//! Events mirror the human-readable battle log but carry identities and
//! field indices, so a client can replay an attack phase without parsing
//! log text.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// One animatable step of combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleEvent {
    /// `amount` damage dealt by `source` to `target`.
    ///
    /// `index` is the target's field index, `None` for a hit on the hero.
    Damage {
        source: String,
        target: String,
        side: Side,
        index: Option<usize>,
        amount: i32,
    },

    /// A monster removed from `side`'s field at `index`.
    Destroyed {
        target: String,
        side: Side,
        index: usize,
    },
}

impl BattleEvent {
    /// Damage event shorthand.
    pub fn damage(source: &str, target: &str, side: Side, index: Option<usize>, amount: i32) -> Self {
        BattleEvent::Damage {
            source: source.to_string(),
            target: target.to_string(),
            side,
            index,
            amount,
        }
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        matches!(self, BattleEvent::Destroyed { .. })
    }
}

/// Log and events produced by a combat step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub log: Vec<String>,
    pub events: Vec<BattleEvent>,
}

impl BattleReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    pub fn event(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    /// Append another report's log and events.
    pub fn extend(&mut self, other: BattleReport) {
        self.log.extend(other.log);
        self.events.extend(other.events);
    }

    /// Number of damage events whose source is `name`.
    #[must_use]
    pub fn hits_by(&self, name: &str) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BattleEvent::Damage { source, .. } if source == name))
            .count()
    }
}
