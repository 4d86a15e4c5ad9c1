//! Core match types: sides, state, configuration, RNG and errors.

pub mod config;
pub mod error;
pub mod rng;
pub mod side;
pub mod state;

pub use config::MatchConfig;
pub use error::{EngineError, EngineResult};
pub use rng::{GameRng, GameRngState};
pub use side::{Side, SideMap};
pub use state::{MatchMode, MatchState, SideState, SIDE_POISON};
