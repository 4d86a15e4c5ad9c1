//! Spell effects.
//!
//! - `Effect`: tagged effect parsed once at card import
//! - `EffectRegistry`: injected handlers for custom effect names
//! - `EffectResolver`: applies an effect to a match
//!
//! ## Shield
//!
//! `shield` is recorded in the log and changes nothing else.

mod effect;
mod registry;
mod resolver;

pub use effect::{Effect, SpellTarget, MAX_MAGNITUDE};
pub use registry::{EffectContext, EffectHandler, EffectRegistry};
pub use resolver::{EffectResolver, NO_EFFECT};
