//! Terminal outcome detection.

use serde::{Deserialize, Serialize};

use crate::core::{MatchMode, MatchState, Side};

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Single winner.
    Victory(Side),
    /// Both sides fell in the same resolution.
    Draw,
}

impl MatchOutcome {
    /// Inspect both hp totals. `None` while both sides are above 0.
    #[must_use]
    pub fn detect(state: &MatchState) -> Option<Self> {
        let first = state.side(Side::First).is_defeated();
        let second = state.side(Side::Second).is_defeated();
        match (first, second) {
            (true, true) => Some(MatchOutcome::Draw),
            (true, false) => Some(MatchOutcome::Victory(Side::Second)),
            (false, true) => Some(MatchOutcome::Victory(Side::First)),
            (false, false) => None,
        }
    }

    /// Client label: the winner's side label, or "draw".
    #[must_use]
    pub fn label(self, mode: MatchMode) -> &'static str {
        match self {
            MatchOutcome::Victory(side) => mode.label(side),
            MatchOutcome::Draw => "draw",
        }
    }
}
