//! Card definitions - stored card data.
//!
//! `CardData` is a card row exactly as the collection store hands it over:
//! loosely typed, with keywords and effects still encoded as strings.
//! `CardInstance::from_data` validates it once; after import the engine
//! only sees typed values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for a card definition in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Monster or spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Monster,
    Spell,
}

impl CardKind {
    /// Parse a stored card type.
    pub fn parse(raw: &str) -> Result<Self, ImportError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "monster" => Ok(CardKind::Monster),
            "spell" => Ok(CardKind::Spell),
            other => Err(ImportError::UnknownKind(other.to_string())),
        }
    }
}

/// One "choose one" stat line for a monster.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceVariant {
    pub name: String,
    pub attack: i32,
    pub defense: i32,
}

/// A card row as stored by the collection layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub name: String,

    /// `"monster"` or `"spell"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Defaults to 1 when absent.
    #[serde(default)]
    pub mana_cost: Option<u32>,

    #[serde(default)]
    pub attack: i32,

    #[serde(default)]
    pub defense: i32,

    /// Explicit health; falls back to `defense`.
    #[serde(default)]
    pub health: Option<i32>,

    #[serde(default)]
    pub overload: u32,

    /// Comma-separated keyword list.
    #[serde(default)]
    pub keywords: Option<String>,

    /// `"type:value"` spell effect.
    #[serde(default)]
    pub effect: Option<String>,

    /// `"opponent"` or `"self"`.
    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub choose_one: Vec<ChoiceVariant>,
}

impl CardData {
    /// A monster row.
    pub fn monster(name: impl Into<String>, mana_cost: u32, attack: i32, defense: i32) -> Self {
        Self {
            name: name.into(),
            kind: "monster".to_string(),
            mana_cost: Some(mana_cost),
            attack,
            defense,
            health: None,
            overload: 0,
            keywords: None,
            effect: None,
            target: None,
            choose_one: Vec::new(),
        }
    }

    /// A spell row.
    pub fn spell(name: impl Into<String>, mana_cost: u32, effect: impl Into<String>) -> Self {
        Self {
            kind: "spell".to_string(),
            effect: Some(effect.into()),
            ..Self::monster(name, mana_cost, 0, 0)
        }
    }

    /// Set the keyword list (builder pattern).
    #[must_use]
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Set explicit health (builder pattern).
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Some(health);
        self
    }

    /// Set overload (builder pattern).
    #[must_use]
    pub fn with_overload(mut self, overload: u32) -> Self {
        self.overload = overload;
        self
    }

    /// Set the spell target (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Add a "choose one" variant (builder pattern).
    #[must_use]
    pub fn with_choice(mut self, name: impl Into<String>, attack: i32, defense: i32) -> Self {
        self.choose_one.push(ChoiceVariant {
            name: name.into(),
            attack,
            defense,
        });
        self
    }
}

/// A card row that could not be imported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("unknown card type '{0}'")]
    UnknownKind(String),

    #[error("card has no name")]
    MissingName,
}
