//! Effect handler registry.
//!
//! Effects without a built-in meaning (`Effect::Custom`) are resolved by
//! handlers registered by name. The registry is an ordinary value: it is
//! built once at startup and handed to the `EffectResolver` by reference,
//! so two engines in the same process can carry different effect sets.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{MatchState, Side};
use crate::effects::SpellTarget;

/// What a handler knows about the cast that triggered it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectContext {
    /// Name of the spell being cast.
    pub card_name: String,
    /// Effect magnitude.
    pub value: u32,
    pub caster: Side,
    pub target: SpellTarget,
}

/// A custom effect handler. Returns the log line for the cast.
pub type EffectHandler = Arc<dyn Fn(&mut MatchState, &EffectContext) -> String + Send + Sync>;

/// Named handlers for custom effects.
#[derive(Clone, Default)]
pub struct EffectRegistry {
    handlers: FxHashMap<String, EffectHandler>,
}

impl EffectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under an effect name, replacing any previous one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl Fn(&mut MatchState, &EffectContext) -> String + Send + Sync + 'static,
    ) {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    /// Register a handler (builder pattern).
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(&mut MatchState, &EffectContext) -> String + Send + Sync + 'static,
    ) -> Self {
        self.register(name, handler);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EffectHandler> {
        self.handlers.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("EffectRegistry").field("handlers", &names).finish()
    }
}
