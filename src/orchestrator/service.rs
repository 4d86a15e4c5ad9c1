//! Match orchestration: the request boundary.
//!
//! Every request follows the same path:
//! 1. Take the match's lock (concurrent requests for one match queue here)
//! 2. Load and decode the stored blob
//! 3. Run the engine operation
//! 4. Persist, or drop the match once every human side has seen its outcome
//!
//! A request that fails in step 3 persists nothing, so the stored match is
//! exactly what it was before the call. A finished versus match stays
//! readable until the losing player has fetched it too.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{info, warn};

use crate::ai::{OpponentPolicy, ScriptedAi};
use crate::cards::{CardCatalog, CardInstance, DeckSelection};
use crate::combat::BattleEvent;
use crate::core::{EngineError, EngineResult, MatchConfig, MatchMode, MatchState, Side, SideMap};
use crate::effects::{EffectRegistry, EffectResolver};
use crate::rules::{self, PlayRequest, TurnController};

use super::store::{MatchId, MatchStore, MemoryStore};
use super::view::ClientView;

/// Copies of each catalog card in the AI's pool.
pub const AI_DECK_COPIES: u32 = 2;

/// Reply to a match start.
#[derive(Clone, Debug, Serialize)]
pub struct StartResponse {
    pub match_id: MatchId,
    pub view: ClientView,
}

/// Reply to a mulligan.
#[derive(Clone, Debug, Serialize)]
pub struct MulliganResponse {
    /// Names of the replacement cards.
    pub drawn: Vec<String>,
    pub view: ClientView,
}

/// Reply to a card play.
#[derive(Clone, Debug, Serialize)]
pub struct PlayResponse {
    pub message: String,
    pub view: ClientView,
}

/// Reply to an end turn.
#[derive(Clone, Debug, Serialize)]
pub struct EndTurnResponse {
    pub battle_log: Vec<String>,
    pub battle_events: Vec<BattleEvent>,
    pub opponent_actions: Vec<String>,

    /// Winner label or "draw".
    pub winner: Option<&'static str>,
    pub view: ClientView,
}

macro_rules! impl_to_json {
    ($($ty:ty),*) => {
        $(impl $ty {
            /// Encode for the client.
            pub fn to_json(&self) -> EngineResult<String> {
                Ok(serde_json::to_string(self)?)
            }
        })*
    };
}

impl_to_json!(StartResponse, MulliganResponse, PlayResponse, EndTurnResponse);

/// Runs matches on behalf of clients.
pub struct MatchOrchestrator<S: MatchStore = MemoryStore> {
    config: MatchConfig,
    catalog: CardCatalog,
    effects: EffectRegistry,
    policy: Box<dyn OpponentPolicy>,
    store: S,
    locks: Mutex<FxHashMap<MatchId, Arc<Mutex<()>>>>,
    next_id: AtomicU64,
}

impl MatchOrchestrator<MemoryStore> {
    /// Orchestrator with an in-memory store and the scripted AI.
    #[must_use]
    pub fn in_memory(catalog: CardCatalog, effects: EffectRegistry) -> Self {
        Self::new(catalog, effects, MemoryStore::new())
    }
}

impl<S: MatchStore> MatchOrchestrator<S> {
    #[must_use]
    pub fn new(catalog: CardCatalog, effects: EffectRegistry, store: S) -> Self {
        Self {
            config: MatchConfig::default(),
            catalog,
            effects,
            policy: Box::new(ScriptedAi),
            store,
            locks: Mutex::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Set the config for new matches (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the opponent policy (builder pattern).
    #[must_use]
    pub fn with_policy(mut self, policy: impl OpponentPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a match against the AI. The player is `Side::First`.
    pub fn start_solo(&self, ai_level: u8, deck: &DeckSelection, seed: u64) -> EngineResult<StartResponse> {
        let player = self.catalog.expand(deck)?;
        let ai = self.catalog.expand(&self.catalog.full_deck(AI_DECK_COPIES))?;
        self.start(MatchMode::Solo { ai_level }, SideMap::from_pair(player, ai), seed)
    }

    /// Start a match between two players. The view is for `Side::First`.
    pub fn start_versus(&self, first: &DeckSelection, second: &DeckSelection, seed: u64) -> EngineResult<StartResponse> {
        let first = self.catalog.expand(first)?;
        let second = self.catalog.expand(second)?;
        self.start(MatchMode::Versus, SideMap::from_pair(first, second), seed)
    }

    /// Current view of a match for one side.
    pub fn view(&self, id: MatchId, side: Side) -> EngineResult<ClientView> {
        self.with_match(id, side, |state| Ok(ClientView::new(state, side)))
    }

    /// Replace up to `mulligan_limit` opening cards.
    pub fn mulligan(&self, id: MatchId, side: Side, indices: &[usize]) -> EngineResult<MulliganResponse> {
        self.with_match(id, side, |state| {
            Self::check_human(state, side)?;
            let drawn = rules::mulligan(state, side, indices)?;
            Ok(MulliganResponse {
                drawn,
                view: ClientView::new(state, side),
            })
        })
    }

    /// Play a card from `side`'s hand.
    pub fn play_card(&self, id: MatchId, side: Side, request: PlayRequest) -> EngineResult<PlayResponse> {
        let resolver = EffectResolver::new(&self.effects);
        self.with_match(id, side, |state| {
            Self::check_human(state, side)?;
            let message = rules::play_card(state, &resolver, side, request)?;
            Ok(PlayResponse {
                message,
                view: ClientView::new(state, side),
            })
        })
    }

    /// End `side`'s turn.
    pub fn end_turn(&self, id: MatchId, side: Side) -> EngineResult<EndTurnResponse> {
        let controller = TurnController::new(EffectResolver::new(&self.effects), self.policy.as_ref());
        self.with_match(id, side, |state| {
            Self::check_human(state, side)?;
            let report = controller.end_turn(state, side)?;
            Ok(EndTurnResponse {
                battle_log: report.battle_log,
                battle_events: report.battle_events,
                opponent_actions: report.opponent_actions,
                winner: report.winner.map(|o| o.label(state.mode)),
                view: ClientView::new(state, side),
            })
        })
    }

    fn start(&self, mode: MatchMode, pools: SideMap<Vec<CardInstance>>, seed: u64) -> EngineResult<StartResponse> {
        let id = MatchId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let state = MatchState::new(self.config.clone(), mode, pools, seed);
        self.store.save(id, state.to_bytes()?);

        info!(match_id = %id, ?mode, seed, "match started");
        Ok(StartResponse {
            match_id: id,
            view: ClientView::new(&state, Side::First),
        })
    }

    /// In solo matches only the player side takes requests.
    fn check_human(state: &MatchState, side: Side) -> EngineResult<()> {
        match state.mode {
            MatchMode::Solo { .. } if side == Side::Second => Err(EngineError::NotYourTurn),
            _ => Ok(()),
        }
    }

    fn lock_for(&self, id: MatchId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(id).or_default())
    }

    fn release_lock(&self, id: MatchId) {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }

    fn with_match<T>(
        &self,
        id: MatchId,
        side: Side,
        op: impl FnOnce(&mut MatchState) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let result = self.run(id, side, op);
        if let Err(err) = &result {
            warn!(match_id = %id, error = %err, "request rejected");
        }
        result
    }

    fn run<T>(
        &self,
        id: MatchId,
        side: Side,
        op: impl FnOnce(&mut MatchState) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let Some(blob) = self.store.load(id) else {
            // Ids are never reused, so nothing will wait on this entry again.
            self.release_lock(id);
            return Err(EngineError::NoActiveMatch);
        };
        let mut state = MatchState::from_bytes(&blob)?;
        let out = op(&mut state)?;

        if state.outcome.is_some() && state.acknowledge_outcome(side) {
            self.store.remove(id);
            self.release_lock(id);
            info!(match_id = %id, turn = state.turn_count, "match closed");
        } else {
            self.store.save(id, state.to_bytes()?);
        }
        Ok(out)
    }
}
