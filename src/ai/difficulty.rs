//! Difficulty profiles.
//!
//! Every knob of the scripted opponent is derived from its level here, so
//! scoring and the play loop never branch on raw level numbers except for
//! the few level gates the scoring rules name.

use crate::core::GameRng;

/// Tuning for one AI level.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyProfile {
    /// Normalized level, at least 1.
    pub level: u8,

    /// How many hand cards are considered. `None` = whole hand.
    pub candidate_pool: Option<usize>,

    /// Cards played per turn. `None` = mana-limited only.
    pub play_cap: Option<usize>,

    /// Scales keyword bonuses and control spells.
    pub keyword_multiplier: f64,

    /// Scales damage and buff spells.
    pub damage_multiplier: f64,

    /// Added to damage spells when the opponent is below 30% hp.
    pub finish_bonus: f64,

    /// Weight of the `10 - mana_cost` efficiency bonus.
    pub mana_efficiency: f64,

    /// Uniform score factor range. `None` = deterministic.
    pub randomness: Option<(f64, f64)>,
}

impl DifficultyProfile {
    /// Profile for `level`. Levels above 5 use the level 5 table, level 0 is 1.
    #[must_use]
    pub fn for_level(level: u8) -> Self {
        let level = level.max(1);
        match level {
            1 => Self {
                level,
                candidate_pool: Some(3),
                play_cap: Some(2),
                keyword_multiplier: 0.3,
                damage_multiplier: 2.0,
                finish_bonus: 0.0,
                mana_efficiency: 0.0,
                randomness: Some((0.4, 1.6)),
            },
            2 => Self {
                level,
                candidate_pool: Some(4),
                play_cap: Some(3),
                keyword_multiplier: 0.7,
                damage_multiplier: 3.0,
                finish_bonus: 50.0,
                mana_efficiency: 0.5,
                randomness: Some((0.7, 1.3)),
            },
            3 => Self {
                level,
                candidate_pool: Some(6),
                play_cap: Some(4),
                keyword_multiplier: 1.0,
                damage_multiplier: 4.0,
                finish_bonus: 100.0,
                mana_efficiency: 1.0,
                randomness: Some((0.85, 1.15)),
            },
            4 => Self {
                level,
                candidate_pool: None,
                play_cap: None,
                keyword_multiplier: 1.5,
                damage_multiplier: 5.5,
                finish_bonus: 150.0,
                mana_efficiency: 1.0,
                randomness: None,
            },
            _ => Self {
                level,
                candidate_pool: None,
                play_cap: None,
                keyword_multiplier: 2.0,
                damage_multiplier: 7.0,
                finish_bonus: 200.0,
                mana_efficiency: 1.0,
                randomness: None,
            },
        }
    }

    /// Bonus for catching up on board, level 2 and up.
    #[must_use]
    pub fn board_presence_bonus(&self) -> f64 {
        if self.level >= 2 {
            10.0 * f64::from(self.level - 1)
        } else {
            0.0
        }
    }

    /// Per-attack-point bonus, level 2 and up.
    #[must_use]
    pub fn aggression(&self) -> f64 {
        if self.level >= 2 {
            0.1 * f64::from(self.level - 1)
        } else {
            0.0
        }
    }

    /// Low levels value healing regardless of hp.
    #[must_use]
    pub fn overvalues_healing(&self) -> bool {
        self.level <= 2
    }

    /// Penalty for burning damage in the first turns, level 3 and up.
    #[must_use]
    pub fn early_damage_penalty(&self, turn_count: u32) -> f64 {
        if self.level >= 3 && turn_count <= 3 {
            20.0
        } else {
            0.0
        }
    }

    /// Apply the level's random factor to a score.
    ///
    /// Deterministic profiles return the score unchanged and do not draw
    /// from the rng.
    pub fn randomize(&self, score: f64, rng: &mut GameRng) -> f64 {
        match self.randomness {
            Some((low, high)) => score * rng.gen_factor(low, high),
            None => score,
        }
    }
}
