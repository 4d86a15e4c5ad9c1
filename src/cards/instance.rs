//! Card instances - runtime card state.
//!
//! `CardInstance` is a card as it exists inside one match: in a draw pool,
//! in a hand, or on a field. Monsters get `current_health`/`max_health`
//! only when they are placed; a card in a hand has neither.

use serde::{Deserialize, Serialize};

use super::definition::{CardData, CardKind, ChoiceVariant, ImportError};
use super::keywords::{Keywords, StatusFlags};
use crate::effects::{Effect, SpellTarget};

/// Match-unique card identifier.
///
/// Allocated by `MatchState` so a card can be tracked across index shifts
/// in hands and fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardUid(pub u32);

impl std::fmt::Display for CardUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub uid: CardUid,
    pub name: String,
    pub kind: CardKind,
    pub mana_cost: u32,
    pub attack: i32,
    pub defense: i32,

    /// Explicit health stat from the card row.
    pub health: Option<i32>,

    /// Set when the monster is placed on a field.
    pub current_health: Option<i32>,
    pub max_health: Option<i32>,

    pub overload: u32,
    pub keywords: Keywords,
    pub status: StatusFlags,

    /// Turns of stun left.
    pub stun_duration: u32,

    /// Damage per tick while `POISONED`.
    pub poison_damage: i32,

    pub effect: Effect,
    pub target: SpellTarget,
    pub choices: Vec<ChoiceVariant>,
}

impl CardInstance {
    /// Import a stored card row.
    ///
    /// The uid is left at 0; the match assigns one when the card enters it.
    pub fn from_data(data: &CardData) -> Result<Self, ImportError> {
        if data.name.trim().is_empty() {
            return Err(ImportError::MissingName);
        }
        let kind = CardKind::parse(&data.kind)?;
        let effect = data.effect.as_deref().map(Effect::parse).unwrap_or_default();
        let target = match data.target.as_deref() {
            Some(raw) => SpellTarget::parse(raw),
            None => effect.natural_target(),
        };

        Ok(Self {
            uid: CardUid::default(),
            name: data.name.clone(),
            kind,
            mana_cost: data.mana_cost.unwrap_or(1),
            attack: data.attack,
            defense: data.defense,
            health: data.health,
            current_health: None,
            max_health: None,
            overload: data.overload,
            keywords: data
                .keywords
                .as_deref()
                .map(Keywords::parse_list)
                .unwrap_or_default(),
            status: StatusFlags::empty(),
            stun_duration: 0,
            poison_damage: 0,
            effect,
            target,
            choices: data.choose_one.clone(),
        })
    }

    #[must_use]
    pub fn is_monster(&self) -> bool {
        self.kind == CardKind::Monster
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.kind == CardKind::Spell
    }

    /// Apply a "choose one" variant. Out-of-range choices are ignored.
    ///
    /// The variant replaces the whole stat line, including explicit health.
    pub fn apply_choice(&mut self, choice: usize) -> Option<&str> {
        let variant = self.choices.get(choice)?.clone();
        self.attack = variant.attack;
        self.defense = variant.defense;
        self.health = None;
        self.choices.clear();
        self.name = format!("{} ({})", self.name, variant.name);
        Some(&self.name)
    }

    /// Initialize combat health for placement: `health`, else `defense`.
    pub fn prepare_for_field(&mut self) {
        let hp = self.health.unwrap_or(self.defense);
        self.current_health = Some(hp);
        self.max_health = Some(hp);
    }

    /// Current health, 0 for cards that are not on a field.
    #[must_use]
    pub fn hp(&self) -> i32 {
        self.current_health.unwrap_or(0)
    }

    /// Subtract damage. Health may go negative until the next sweep.
    pub fn take_damage(&mut self, amount: i32) {
        let hp = self.hp();
        self.current_health = Some(hp.saturating_sub(amount));
    }

    /// Placed and at or below 0 health.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        matches!(self.current_health, Some(hp) if hp <= 0)
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keywords) -> bool {
        self.keywords.contains(keyword)
    }

    #[must_use]
    pub fn has_status(&self, status: StatusFlags) -> bool {
        self.status.contains(status)
    }

    /// Stunned and frozen monsters skip their attack.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        !self.status.intersects(StatusFlags::STUNNED | StatusFlags::FROZEN)
    }

    /// Consume a divine shield. Returns whether one was present.
    pub fn consume_divine_shield(&mut self) -> bool {
        let had = self.keywords.contains(Keywords::DIVINE_SHIELD);
        self.keywords.remove(Keywords::DIVINE_SHIELD);
        had
    }

    /// Apply a stun for `turns` turns.
    pub fn stun(&mut self, turns: u32) {
        self.status.insert(StatusFlags::STUNNED);
        self.stun_duration = turns;
    }

    /// Count a stun down by one turn, clearing it at zero.
    pub fn decay_stun(&mut self) {
        if self.stun_duration > 0 {
            self.stun_duration -= 1;
        }
        if self.stun_duration == 0 {
            self.status.remove(StatusFlags::STUNNED);
        }
    }

    /// Mark as poisoned with a fixed tick damage.
    pub fn poison(&mut self, damage: i32) {
        self.status.insert(StatusFlags::POISONED);
        self.poison_damage = damage;
    }

    /// Short stat label for logs: `Name (ATK/HP)`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.current_health {
            Some(hp) => format!("{} ({}/{})", self.name, self.attack, hp),
            None => format!("{} ({}/{})", self.name, self.attack, self.health.unwrap_or(self.defense)),
        }
    }
}
