//! # ccg-arena
//!
//! Turn-based combat engine for a collectible card battler.
//!
//! ## Design Principles
//!
//! 1. **One Rules Path**: single-player and versus matches share one
//!    two-side `MatchState`; combat is written once against `Side`.
//!
//! 2. **Validate, Then Mutate**: every operation either applies fully or
//!    returns an `EngineError` with the state untouched.
//!
//! 3. **Injected Registries**: custom effects come from an
//!    `EffectRegistry` value handed to the engine, never a global.
//!
//! ## Architecture
//!
//! - **Deterministic**: all randomness (shuffles, AI mistakes) flows from
//!   the match's ChaCha8 `GameRng`, which persists with the match.
//!
//! - **Opaque Persistence**: the orchestrator stores each match as a
//!   bincode blob and serves clients a JSON `ClientView`.
//!
//! ## Modules
//!
//! - `core`: sides, match state, config, RNG, errors
//! - `cards`: card import, keywords, catalog
//! - `effects`: spell effects and the effect registry
//! - `combat`: attack phase resolution and battle events
//! - `rules`: card play, mulligan, end-of-turn state machine
//! - `ai`: difficulty-scaled scripted opponent
//! - `orchestrator`: request boundary, storage, client views

pub mod ai;
pub mod cards;
pub mod combat;
pub mod core;
pub mod effects;
pub mod orchestrator;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    EngineError, EngineResult,
    GameRng, GameRngState,
    MatchConfig, MatchMode, MatchState, SideState,
    Side, SideMap,
};

pub use crate::cards::{
    CardCatalog, CardData, CardId, CardInstance, CardKind, CardUid,
    DeckSelection, Keywords, StatusFlags,
};

pub use crate::effects::{Effect, EffectContext, EffectRegistry, EffectResolver, SpellTarget};

pub use crate::combat::{BattleEvent, BattleReport, CombatResolver};

pub use crate::rules::{EndTurnReport, MatchOutcome, PlayRequest, TurnController};

pub use crate::ai::{DifficultyProfile, OpponentPolicy, ScriptedAi};

pub use crate::orchestrator::{ClientView, MatchId, MatchOrchestrator, MatchStore, MemoryStore};
