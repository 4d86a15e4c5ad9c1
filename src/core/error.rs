//! Engine error types.
//!
//! Every engine entry point validates before it mutates, so an `Err`
//! always means the match state was left untouched.

use thiserror::Error;

use crate::cards::{CardId, ImportError};

/// A rejected engine request.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("it is not your turn")]
    NotYourTurn,

    #[error("no active match")]
    NoActiveMatch,

    #[error("invalid card index {index} (hand holds {hand_size} cards)")]
    InvalidCardIndex { index: usize, hand_size: usize },

    #[error("not enough mana: card costs {cost}, {available} available")]
    InsufficientMana { cost: u32, available: u32 },

    #[error("mulligan already used")]
    MulliganAlreadyUsed,

    #[error("mulligan may replace at most {limit} cards, {requested} selected")]
    MulliganTooManyCards { requested: usize, limit: usize },

    #[error("unknown card: {0}")]
    UnknownCard(CardId),

    #[error("card already registered: {0}")]
    DuplicateCard(CardId),

    #[error("card import failed: {0}")]
    Import(#[from] ImportError),

    #[error("stored match state could not be decoded: {0}")]
    Codec(#[from] bincode::Error),

    #[error("response encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Engine result alias.
pub type EngineResult<T> = Result<T, EngineError>;
