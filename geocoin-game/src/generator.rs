//! Deterministic cache placement and initial coin counts.
//!
//! Both decisions are pure functions of the cell coordinates and the spawn
//! probability, so an untouched cell regenerates identically whenever the
//! player wanders back to it. Only mutated caches need stored state.
use crate::constants::{CELL_KEY_DELIMITER, MAX_INITIAL_COINS, VALUE_SEED_SUFFIX};
use crate::grid::GridCell;
use crate::luck::Luck;
use crate::numbers::floor_f64_to_u32;

/// Seed key for the spawn roll: `"i,j"`.
#[must_use]
pub fn spawn_seed(cell: &GridCell) -> String {
    cell.key()
}

/// Seed key for the coin-count roll: `"i,j,value"`.
#[must_use]
pub fn value_seed(cell: &GridCell) -> String {
    format!("{}{CELL_KEY_DELIMITER}{VALUE_SEED_SUFFIX}", cell.key())
}

#[derive(Debug, Clone)]
pub struct CacheGenerator<L> {
    luck: L,
    probability: f64,
}

impl<L: Luck> CacheGenerator<L> {
    #[must_use]
    pub const fn new(luck: L, probability: f64) -> Self {
        Self { luck, probability }
    }

    #[must_use]
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// Whether a cache lives in `cell`.
    #[must_use]
    pub fn should_spawn(&self, cell: &GridCell) -> bool {
        self.luck.luck(&spawn_seed(cell)) < self.probability
    }

    /// Coins a never-touched cache starts with, in `0..100`.
    #[must_use]
    pub fn initial_value(&self, cell: &GridCell) -> u32 {
        let roll = sanitize_roll(self.luck.luck(&value_seed(cell)));
        floor_f64_to_u32(roll * f64::from(MAX_INITIAL_COINS)).min(MAX_INITIAL_COINS - 1)
    }
}

// A misbehaving luck source must not push counts outside 0..100.
fn sanitize_roll(roll: f64) -> f64 {
    if roll.is_finite() {
        roll.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
