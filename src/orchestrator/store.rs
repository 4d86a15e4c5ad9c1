//! Match storage.
//!
//! The orchestrator persists each match as an opaque blob (the bincode
//! encoding of `MatchState`). `MatchStore` is the seam for a real
//! database; `MemoryStore` keeps blobs in process.

use std::sync::{Mutex, PoisonError};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Match identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl MatchId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Match({})", self.0)
    }
}

/// Blob storage keyed by match.
pub trait MatchStore: Send + Sync {
    /// Stored blob, if the match exists.
    fn load(&self, id: MatchId) -> Option<Vec<u8>>;

    /// Insert or overwrite.
    fn save(&self, id: MatchId, blob: Vec<u8>);

    /// Delete. Returns whether the match existed.
    fn remove(&self, id: MatchId) -> bool;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<FxHashMap<MatchId, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MatchStore for MemoryStore {
    fn load(&self, id: MatchId) -> Option<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn save(&self, id: MatchId, blob: Vec<u8>) {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, blob);
    }

    fn remove(&self, id: MatchId) -> bool {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }
}
