//! Combat: one side's attack phase.
//!
//! - `CombatResolver`: target selection, simultaneous damage exchange,
//!   keyword handling and the post-phase destruction sweep
//! - `BattleEvent` / `BattleReport`: log lines plus structured events for
//!   client animation

mod events;
mod resolver;

pub use events::{BattleEvent, BattleReport};
pub use resolver::CombatResolver;
