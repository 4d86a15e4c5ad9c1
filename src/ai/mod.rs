//! Scripted opponent for single-player matches.
//!
//! ## Turn
//!
//! 1. Take the first N hand cards as candidates (N by difficulty)
//! 2. Score each candidate and apply the level's random factor
//! 3. Play in descending score order while mana and the play cap allow,
//!    holding heals at high hp and buffs on an empty field
//!
//! Lower levels see fewer cards, value keywords less and make more
//! random mistakes. Level 4 and up are fully deterministic.

mod difficulty;
mod policy;
mod scoring;

pub use difficulty::DifficultyProfile;
pub use policy::{OpponentPolicy, ScriptedAi, DEFAULT_AI_LEVEL};
pub use scoring::score;
