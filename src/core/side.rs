//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! A match always has exactly two participants. `Side::First` is the human
//! player (or `player1` in versus play); `Side::Second` is the AI (or
//! `player2`).
//!
//! ## SideMap
//!
//! Two-slot storage indexed by `Side`. All combat code is written once
//! against `Side` and reads both participants through a `SideMap`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two participants in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Both sides in turn order.
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    /// The other participant.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Slot index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// Per-side data storage.
///
/// ```
/// use ccg_arena::core::{Side, SideMap};
///
/// let mut hp: SideMap<i32> = SideMap::with_value(30);
/// hp[Side::Second] -= 5;
/// assert_eq!(hp[Side::First], 30);
/// assert_eq!(hp[Side::Second], 25);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    slots: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            slots: [factory(Side::First), factory(Side::Second)],
        }
    }

    /// Create a map from explicit values.
    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            slots: [first, second],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Split into (first, second).
    pub fn into_pair(self) -> (T, T) {
        let [first, second] = self.slots;
        (first, second)
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.slots[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.slots[side.index()]
    }

    /// Mutable access to both sides at once, acting side first.
    pub fn pair_mut(&mut self, acting: Side) -> (&mut T, &mut T) {
        let [first, second] = &mut self.slots;
        match acting {
            Side::First => (first, second),
            Side::Second => (second, first),
        }
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.slots.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
