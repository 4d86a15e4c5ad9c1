//! Card catalog for definition lookup and deck expansion.
//!
//! The `CardCatalog` holds every importable card, keyed by `CardId`. Match
//! setup asks it to expand a `DeckSelection` into the instances that form a
//! draw pool.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardData, CardId};
use super::instance::CardInstance;
use crate::core::error::{EngineError, EngineResult};

/// What a side brings into a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckSelection {
    /// A built deck: card ids with copy counts.
    Deck(Vec<(CardId, u32)>),
    /// A raw collection, one copy per listed id.
    Collection(Vec<CardId>),
}

/// Catalog of importable cards.
///
/// ```
/// use ccg_arena::cards::{CardCatalog, CardData, CardId, DeckSelection};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardId::new(1), CardData::monster("Wolf", 2, 200, 100)).unwrap();
///
/// let pool = catalog.expand(&DeckSelection::Deck(vec![(CardId::new(1), 2)])).unwrap();
/// assert_eq!(pool.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardInstance>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Import and register a card row.
    ///
    /// Fails if a card with the same ID already exists; the catalog is left
    /// unchanged.
    pub fn register(&mut self, id: CardId, data: CardData) -> EngineResult<()> {
        if self.cards.contains_key(&id) {
            return Err(EngineError::DuplicateCard(id));
        }
        let card = CardInstance::from_data(&data)?;
        self.cards.insert(id, card);
        Ok(())
    }

    /// Get an imported card template.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All registered ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        let mut ids: Vec<_> = self.cards.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Expand a deck selection into unshuffled card instances.
    pub fn expand(&self, selection: &DeckSelection) -> EngineResult<Vec<CardInstance>> {
        let mut pool = Vec::new();
        match selection {
            DeckSelection::Deck(entries) => {
                for &(id, count) in entries {
                    let card = self.get(id).ok_or(EngineError::UnknownCard(id))?;
                    pool.extend(std::iter::repeat(card).take(count as usize).cloned());
                }
            }
            DeckSelection::Collection(ids) => {
                for &id in ids {
                    let card = self.get(id).ok_or(EngineError::UnknownCard(id))?;
                    pool.push(card.clone());
                }
            }
        }
        Ok(pool)
    }

    /// A deck with `copies` of every catalog card, used for the AI side.
    #[must_use]
    pub fn full_deck(&self, copies: u32) -> DeckSelection {
        DeckSelection::Deck(self.ids().into_iter().map(|id| (id, copies)).collect())
    }
}
