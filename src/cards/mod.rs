//! Card system: stored card rows, runtime instances and the catalog.
//!
//! ## Key Types
//!
//! - `CardData`: a stored card row as it arrives from the card store
//! - `CardInstance`: a card inside one match (pool, hand or field)
//! - `Keywords` / `StatusFlags`: closed bitsets validated at import
//! - `CardCatalog`: card lookup and deck expansion

pub mod definition;
pub mod instance;
pub mod keywords;
pub mod registry;

pub use definition::{CardData, CardId, CardKind, ChoiceVariant, ImportError};
pub use instance::{CardInstance, CardUid};
pub use keywords::{Keywords, StatusFlags};
pub use registry::{CardCatalog, DeckSelection};
