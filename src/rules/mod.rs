//! Match rules: card play, the end-of-turn state machine and outcome
//! detection.
//!
//! Every entry point takes the `MatchState` by `&mut` and either applies
//! the whole transformation or returns an error without mutating.

mod outcome;
mod play;
mod turn;

pub use outcome::MatchOutcome;
pub use play::{mulligan, play_card, PlayRequest};
pub use turn::{tick_statuses, EndTurnReport, TurnController};
