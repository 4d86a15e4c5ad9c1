//! Request boundary: match lifecycle, persistence and client views.
//!
//! - `MatchOrchestrator`: start, mulligan, play card, end turn
//! - `MatchStore` / `MemoryStore`: blob persistence keyed by `MatchId`
//! - `ClientView`: what one side's client is allowed to see

mod service;
mod store;
mod view;

pub use service::{
    EndTurnResponse, MatchOrchestrator, MulliganResponse, PlayResponse, StartResponse, AI_DECK_COPIES,
};
pub use store::{MatchId, MatchStore, MemoryStore};
pub use view::{CardView, ClientView, OpponentView, OwnView};
